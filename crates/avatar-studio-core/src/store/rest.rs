//! PostgREST client for the hosted store. reqwest only; one shared connection pool
//! per `RestStore` clone.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use super::{Order, Query, StudioSource};
use crate::config::StudioConfig;
use crate::error::{ConfigError, QueryError};
use crate::models::{
    AiProvider, Avatar, AvatarReference, Prompt, AI_PROVIDERS_TABLE, AVATARS_TABLE,
    AVATAR_REFERENCES_TABLE, PROMPTS_TABLE,
};

const REST_PREFIX: [&str; 2] = ["rest", "v1"];
const SINGLE_OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";

#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestStore {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Client authenticated with the public key; subject to row-level policies.
    pub fn anonymous(config: &StudioConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.public_url()?, config.public_key.clone()))
    }

    /// Server-only client authenticated with the service-role key.
    /// Fails immediately when the key is not configured.
    pub fn privileged(config: &StudioConfig) -> Result<Self, ConfigError> {
        let key = config.service_role_key()?;
        Ok(Self::new(config.public_url()?, key))
    }

    /// `{base}/rest/v1/{table}?select=*&...`. Any query or fragment on the base URL is dropped.
    fn table_url(&self, query: &Query) -> Result<Url, QueryError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| QueryError::Url {
                table: query.table_name().to_string(),
                message: format!("`{}` cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(REST_PREFIX)
            .push(query.table_name());
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        Ok(url)
    }

    async fn fetch(&self, query: &Query) -> Result<String, QueryError> {
        let table = query.table_name().to_string();
        let url = self.table_url(query)?;

        let mut request = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key);
        if query.is_single() {
            request = request.header(ACCEPT, SINGLE_OBJECT_MEDIA_TYPE);
        }

        let res = request.send().await.map_err(|source| QueryError::Transport {
            table: table.clone(),
            source,
        })?;

        let status = res.status();
        let text = res.text().await.map_err(|source| QueryError::Transport {
            table: table.clone(),
            source,
        })?;

        // PostgREST answers 406 when single-object mode matches zero or many rows.
        if query.is_single() && status == StatusCode::NOT_ACCEPTABLE {
            return Err(QueryError::NotSingleRow { table });
        }
        if !status.is_success() {
            return Err(QueryError::Status {
                table,
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }

    /// All rows matching `query`.
    pub async fn select<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, QueryError> {
        let text = self.fetch(query).await?;
        serde_json::from_str(&text).map_err(|e| QueryError::Decode {
            table: query.table_name().to_string(),
            message: e.to_string(),
        })
    }

    /// Exactly one row matching `query` (single-row mode is forced).
    pub async fn select_single<T: DeserializeOwned>(&self, query: &Query) -> Result<T, QueryError> {
        let query = query.clone().single();
        let text = self.fetch(&query).await?;
        serde_json::from_str(&text).map_err(|e| QueryError::Decode {
            table: query.table_name().to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl StudioSource for RestStore {
    async fn active_providers(&self) -> Result<Vec<AiProvider>, QueryError> {
        let query = Query::table(AI_PROVIDERS_TABLE)
            .eq("is_active", true)
            .order("name", Order::Ascending);
        self.select(&query).await
    }

    async fn prompts_for_owner(&self, owner_id: &str) -> Result<Vec<Prompt>, QueryError> {
        let query = Query::table(PROMPTS_TABLE)
            .eq("user_id", owner_id)
            .order("created_at", Order::Descending);
        self.select(&query).await
    }

    async fn avatar(&self, avatar_id: &str) -> Result<Avatar, QueryError> {
        let query = Query::table(AVATARS_TABLE).eq("id", avatar_id).single();
        self.select_single(&query).await
    }

    async fn avatar_references(
        &self,
        avatar_id: &str,
    ) -> Result<Vec<AvatarReference>, QueryError> {
        let query = Query::table(AVATAR_REFERENCES_TABLE).eq("avatar_id", avatar_id);
        self.select(&query).await
    }
}

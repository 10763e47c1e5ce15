//! Aggregate studio fetch: providers, owner prompts, one avatar and its references,
//! assembled best-effort. Each field degrades to its empty default on failure and
//! the call as a whole never fails.
//!
//! Stage 1 runs the three independent reads concurrently on the calling task.
//! Stage 2 (references) runs only once stage 1 produced an avatar.

use tracing::{debug, warn};

use crate::error::QueryError;
use crate::models::{
    AiProvider, Avatar, AvatarReference, Prompt, AI_PROVIDERS_TABLE, AVATARS_TABLE,
    AVATAR_REFERENCES_TABLE, PROMPTS_TABLE,
};
use crate::store::StudioSource;

/// How a field of `StudioData` was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The query ran and succeeded (the result may still be empty).
    Loaded,
    /// No query was issued because its input was absent.
    Skipped,
    /// The query failed; the field holds its empty default. Carries the error text.
    Degraded(String),
}

impl FieldOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, FieldOutcome::Degraded(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioOutcomes {
    pub avatar: FieldOutcome,
    pub references: FieldOutcome,
    pub providers: FieldOutcome,
    pub prompts: FieldOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudioData {
    pub avatar: Option<Avatar>,
    pub references: Vec<AvatarReference>,
    pub providers: Vec<AiProvider>,
    pub prompts: Vec<Prompt>,
    pub outcomes: StudioOutcomes,
}

impl StudioData {
    /// True when any field was replaced by its default because a query failed.
    pub fn is_degraded(&self) -> bool {
        let o = &self.outcomes;
        o.avatar.is_degraded()
            || o.references.is_degraded()
            || o.providers.is_degraded()
            || o.prompts.is_degraded()
    }
}

/// Fetches everything the studio page shows. `record_id` selects the avatar,
/// `owner_id` selects the prompts; either may be absent.
pub async fn fetch_studio_data<S>(
    source: &S,
    record_id: Option<&str>,
    owner_id: Option<&str>,
) -> StudioData
where
    S: StudioSource + ?Sized,
{
    let providers = async { degrade_list(AI_PROVIDERS_TABLE, source.active_providers().await) };

    let prompts = async {
        match owner_id {
            Some(owner) => degrade_list(PROMPTS_TABLE, source.prompts_for_owner(owner).await),
            None => (Vec::new(), FieldOutcome::Skipped),
        }
    };

    let avatar = async {
        match record_id {
            Some(id) => match source.avatar(id).await {
                Ok(avatar) => (Some(avatar), FieldOutcome::Loaded),
                Err(e) => {
                    warn!(table = AVATARS_TABLE, avatar_id = id, "avatar lookup failed: {}", e);
                    (None, FieldOutcome::Degraded(e.to_string()))
                }
            },
            None => (None, FieldOutcome::Skipped),
        }
    };

    let ((providers, providers_outcome), (prompts, prompts_outcome), (avatar, avatar_outcome)) =
        tokio::join!(providers, prompts, avatar);

    let (references, references_outcome) = match (avatar.as_ref(), record_id) {
        (Some(_), Some(id)) => degrade_list(
            AVATAR_REFERENCES_TABLE,
            source.avatar_references(id).await,
        ),
        _ => (Vec::new(), FieldOutcome::Skipped),
    };

    debug!(
        providers = providers.len(),
        prompts = prompts.len(),
        avatar = avatar.is_some(),
        references = references.len(),
        "studio data assembled"
    );

    StudioData {
        avatar,
        references,
        providers,
        prompts,
        outcomes: StudioOutcomes {
            avatar: avatar_outcome,
            references: references_outcome,
            providers: providers_outcome,
            prompts: prompts_outcome,
        },
    }
}

fn degrade_list<T>(table: &str, result: Result<Vec<T>, QueryError>) -> (Vec<T>, FieldOutcome) {
    match result {
        Ok(rows) => (rows, FieldOutcome::Loaded),
        Err(e) => {
            warn!(table, "query failed, using empty list: {}", e);
            (Vec::new(), FieldOutcome::Degraded(e.to_string()))
        }
    }
}

//! Store access. `StudioSource` is the seam the studio fetch depends on;
//! `RestStore` implements it against the hosted PostgREST endpoint.

mod query;
mod rest;

use async_trait::async_trait;

use crate::error::QueryError;
use crate::models::{AiProvider, Avatar, AvatarReference, Prompt};

pub use query::{Order, Query};
pub use rest::RestStore;

/// The four reads the studio page needs. Handles are passed in explicitly so
/// tests can substitute a stub.
#[async_trait]
pub trait StudioSource: Send + Sync {
    /// Providers with `is_active = true`, ordered by name ascending.
    async fn active_providers(&self) -> Result<Vec<AiProvider>, QueryError>;

    /// Prompts owned by `owner_id`, newest first.
    async fn prompts_for_owner(&self, owner_id: &str) -> Result<Vec<Prompt>, QueryError>;

    /// Exactly one avatar. Not-found is reported as an error.
    async fn avatar(&self, avatar_id: &str) -> Result<Avatar, QueryError>;

    /// Reference rows whose `avatar_id` matches.
    async fn avatar_references(&self, avatar_id: &str)
        -> Result<Vec<AvatarReference>, QueryError>;
}

//! Row shapes read from the hosted store. The store owns the schemas; these
//! structs only name the columns the studio consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const AVATARS_TABLE: &str = "avatars";
pub const AVATAR_REFERENCES_TABLE: &str = "avatar_references";
pub const AI_PROVIDERS_TABLE: &str = "ai_providers";
pub const PROMPTS_TABLE: &str = "prompts";

/// Top-level studio record, looked up by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Reference image attached to exactly one avatar via `avatar_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarReference {
    pub id: String,
    pub avatar_id: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Global generation provider. Read-only to the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiProvider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Saved prompt owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

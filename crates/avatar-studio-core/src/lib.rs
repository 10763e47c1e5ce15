//! Avatar Studio — Core library.
//! Store access, the aggregate studio fetch, storage URL building and the
//! server-rendered page components shared by the gateway.

pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;
pub mod studio;

pub use components::{html_escape, FaqItem, FaqProps, MountedReveal, WordReveal};
pub use config::StudioConfig;
pub use error::{ConfigError, QueryError};
pub use models::{AiProvider, Avatar, AvatarReference, Prompt};
pub use storage::{ResizeMode, StorageUrls, TransformOptions};
pub use store::{Order, Query, RestStore, StudioSource};
pub use studio::{fetch_studio_data, FieldOutcome, StudioData, StudioOutcomes};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

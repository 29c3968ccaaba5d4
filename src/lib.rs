pub mod advice;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;
pub mod videos;

pub use advice::{AdviceGenerator, AdviceModel, GroqModel};
pub use config::AppConfig;
pub use error::{AdvisorError, ConfigError};
pub use handlers::{AdvisorHandler, reset};
pub use models::*;
pub use service::{AppState, create_app};
pub use videos::{VideoLookup, VideoSearch, YouTubeSearch};

//! Publishing results as question groups on the content-management
//! service.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tags;

pub use client::PublishClient;
pub use config::PublishConfig;
pub use error::PublishError;
pub use models::{Multilingual, PublishOutcome, Question, Tag};
pub use tags::{find_tag, flatten_tags, slugify};

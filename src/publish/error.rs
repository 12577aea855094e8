use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("could not reach the publishing service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("publishing service returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("unexpected publishing service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("the created group has no id")]
    MissingGroupId,

    #[error("there are no exercises to publish")]
    NothingToPublish,

    /// The group was created but filling it failed; retries should target
    /// `group_id` instead of creating another group.
    #[error("group {group_id} was created but adding questions failed: {source}")]
    AppendFailed {
        group_id: i64,
        #[source]
        source: Box<PublishError>,
    },
}

impl PublishError {
    /// Id of a group this failed call created, if any.
    pub fn created_group(&self) -> Option<i64> {
        match self {
            Self::AppendFailed { group_id, .. } => Some(*group_id),
            _ => None,
        }
    }
}

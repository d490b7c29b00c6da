use serde::{Deserialize, Serialize};

/// Body of the unread-notification count endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCounts {
    /// Total number of notifications, when the server reports it
    #[serde(default)]
    pub all: Option<u64>,
    pub not_checked: u64,
}

/// Form body of every state-changing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectedForm {
    pub csrf_token: String,
}

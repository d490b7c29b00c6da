//! View models handed to the action handlers at bind time

use common::Selector;
use serde::{Deserialize, Serialize};

/// A rendered notification with its "mark as checked" endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    /// Id of the element removed once the notification is checked
    pub element_id: String,
    pub check_url: String,
}

impl NotificationItem {
    pub fn selector(&self) -> Selector {
        Selector::id(self.element_id.as_str())
    }
}

/// One of the user's active sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionItem {
    pub id: u64,
    pub terminate_url: String,
}

impl SessionItem {
    /// `#session-{id}`
    pub fn selector(&self) -> Selector {
        Selector::id(format!("session-{}", self.id))
    }
}

/// A comment under a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentItem {
    pub id: u64,
    pub delete_url: String,
    pub reply_url: String,
    pub author_username: String,
}

impl CommentItem {
    /// `#comment-{id}`
    pub fn selector(&self) -> Selector {
        Selector::id(format!("comment-{}", self.id))
    }

    /// `.comment-{id}-child`, every reply rendered under this comment
    pub fn children_selector(&self) -> Selector {
        Selector::class(format!("comment-{}-child", self.id))
    }
}

/// Identity of an item for the in-flight click guard
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Notification(String),
    Session(u64),
    Comment(u64),
}

impl From<&NotificationItem> for ItemKey {
    fn from(item: &NotificationItem) -> Self {
        ItemKey::Notification(item.element_id.clone())
    }
}

impl From<&SessionItem> for ItemKey {
    fn from(item: &SessionItem) -> Self {
        ItemKey::Session(item.id)
    }
}

impl From<&CommentItem> for ItemKey {
    fn from(item: &CommentItem) -> Self {
        ItemKey::Comment(item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_selectors() {
        let comment: CommentItem = serde_json::from_str(
            r#"{"id": 42, "delete_url": "/comments/42/delete", "reply_url": "/comments/42/reply", "author_username": "bob"}"#,
        )
        .expect("valid view model");

        assert_eq!(comment.selector().to_string(), "#comment-42");
        assert_eq!(comment.children_selector().to_string(), ".comment-42-child");
    }

    #[test]
    fn test_session_selector() {
        let session = SessionItem {
            id: 3,
            terminate_url: "/accounts/sessions/3/terminate/".to_string(),
        };
        assert_eq!(session.selector().to_string(), "#session-3");
    }
}

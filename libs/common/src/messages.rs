//! Localized message table

use serde::Deserialize;

/// Strings shown to the user by the page components
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub are_you_sure_delete_comment: String,
    pub comment_deleted_success: String,
    pub are_you_sure_terminate_session: String,
    pub session_terminated_success: String,
    pub cookies_required: String,
    /// Shown when a state-changing request did not succeed
    pub request_failed: String,
    /// Prefix of the reply label, followed by the author's name
    pub reply_to: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            are_you_sure_delete_comment: "Are you sure you want to delete this comment?"
                .to_string(),
            comment_deleted_success: "The comment was successfully deleted.".to_string(),
            are_you_sure_terminate_session: "Are you sure you want to terminate this session?"
                .to_string(),
            session_terminated_success: "The session was successfully terminated.".to_string(),
            cookies_required: "This website requires cookies to function properly.".to_string(),
            request_failed: "Something went wrong, please try again.".to_string(),
            reply_to: "Reply to".to_string(),
        }
    }
}

impl Messages {
    /// Label shown above the comment form while replying
    pub fn reply_label(&self, author_username: &str) -> String {
        format!("{} {}", self.reply_to, author_username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_label() {
        let messages = Messages::default();
        assert_eq!(messages.reply_label("alice"), "Reply to alice");
    }
}

//! Comment deletion and reply targeting

use std::sync::Arc;

use common::page::regions;
use common::{ClientResult, Messages, Page, Selector, Transport};
use tracing::debug;

use crate::context::{ActionContext, ActionOutcome, ActionRequest};
use crate::models::CommentItem;

impl<T: Transport, P: Page> ActionContext<T, P> {
    /// Delete a comment and every reply rendered under it, after confirmation
    pub async fn delete_comment(&self, comment: &CommentItem) -> ClientResult<ActionOutcome> {
        let messages = self.messages().clone();
        let request = ActionRequest {
            key: comment.into(),
            url: &comment.delete_url,
            confirm: Some(messages.are_you_sure_delete_comment.as_str()),
            success_flash: Some(messages.comment_deleted_success.as_str()),
        };

        self.perform(request, |page| {
            let removed = page.remove(&comment.selector());
            let children = page.remove(&comment.children_selector());
            debug!(
                "Removed comment {} ({} element(s)) and {} child element(s)",
                comment.id, removed, children
            );
        })
        .await
    }

    /// Comment form bound to this context's page and messages
    pub fn reply_form(&self, default_action: impl Into<String>) -> ReplyForm<P> {
        ReplyForm::new(
            Arc::clone(self.page()),
            Arc::clone(self.messages()),
            default_action,
        )
    }
}

/// Where the comment form currently posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyState {
    /// Posting a new top-level comment
    Idle,
    /// Posting a reply to `comment_id`
    ReplyingTo {
        comment_id: u64,
        reply_url: String,
        author_username: String,
    },
}

/// The comment form and its reply label and cancel control
///
/// Replying to another comment while already replying replaces the target.
pub struct ReplyForm<P: Page> {
    page: Arc<P>,
    messages: Arc<Messages>,
    default_action: String,
    state: ReplyState,
}

impl<P: Page> ReplyForm<P> {
    pub fn new(page: Arc<P>, messages: Arc<Messages>, default_action: impl Into<String>) -> Self {
        Self {
            page,
            messages,
            default_action: default_action.into(),
            state: ReplyState::Idle,
        }
    }

    pub fn state(&self) -> &ReplyState {
        &self.state
    }

    /// URL the form currently submits to
    pub fn action(&self) -> &str {
        match &self.state {
            ReplyState::Idle => &self.default_action,
            ReplyState::ReplyingTo { reply_url, .. } => reply_url,
        }
    }

    pub fn reply_to(&mut self, comment: &CommentItem) {
        self.state = ReplyState::ReplyingTo {
            comment_id: comment.id,
            reply_url: comment.reply_url.clone(),
            author_username: comment.author_username.clone(),
        };
        self.apply(&self.messages.reply_label(&comment.author_username), true);
    }

    pub fn cancel(&mut self) {
        self.state = ReplyState::Idle;
        self.apply("", false);
    }

    fn apply(&self, label: &str, cancel_visible: bool) {
        self.page.set_text(&Selector::id(regions::REPLY_INFO), label);
        self.page.set_attribute(&Selector::id(regions::COMMENT_FORM), "action", self.action());
        self.page.set_visible(&Selector::id(regions::REPLY_CANCEL_BUTTON), cancel_visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{config, context, flashes, settle_flashes};
    use common::page::Element;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    fn comment(id: u64, author: &str) -> CommentItem {
        CommentItem {
            id,
            delete_url: format!("http://blog.test/posts/comments/{}/delete/", id),
            reply_url: format!("http://blog.test/posts/comments/{}/reply/", id),
            author_username: author.to_string(),
        }
    }

    fn insert_thread(page: &common::MemoryPage, id: u64, replies: usize) {
        page.insert(Element::with_id(format!("comment-{}", id)));
        for _ in 0..replies {
            page.insert(Element::with_class(format!("comment-{}-child", id)));
        }
    }

    fn form_action(page: &common::MemoryPage) -> Option<String> {
        page.attribute_of(&Selector::id(regions::COMMENT_FORM), "action")
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmed_delete_removes_comment_and_children() {
        let (transport, page, context) = context();
        let item = comment(42, "bob");
        insert_thread(&page, 42, 2);
        insert_thread(&page, 43, 1);
        page.answer_confirm(true);

        let outcome = assert_ok!(context.delete_comment(&item).await);
        settle_flashes().await;

        assert_eq!(outcome, ActionOutcome::Completed);
        assert_eq!(transport.posts(), vec![item.delete_url.clone()]);
        assert!(!page.contains(&item.selector()));
        assert!(!page.contains(&item.children_selector()));
        assert!(page.contains(&Selector::id("comment-43")));
        assert!(page.contains(&Selector::class("comment-43-child")));

        let flashes = flashes(&page);
        assert_eq!(flashes.len(), 1);
        assert!(flashes[0].contains("alert-danger"));
        assert!(flashes[0].contains(&context.messages().comment_deleted_success));
    }

    #[tokio::test(start_paused = true)]
    async fn test_declined_delete_changes_nothing() {
        let (transport, page, context) = context();
        let item = comment(42, "bob");
        insert_thread(&page, 42, 1);

        let outcome = assert_ok!(context.delete_comment(&item).await);
        settle_flashes().await;

        assert_eq!(outcome, ActionOutcome::Declined);
        assert!(transport.posts().is_empty());
        assert!(page.contains(&item.selector()));
        assert!(page.contains(&item.children_selector()));
        assert!(flashes(&page).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_delete_leaves_page_and_reports() {
        let (transport, page, context) = context();
        let item = comment(42, "bob");
        insert_thread(&page, 42, 1);
        page.answer_confirm(true);
        transport.fail_with(500);

        assert_err!(context.delete_comment(&item).await);
        settle_flashes().await;

        assert!(page.contains(&item.selector()));
        assert!(page.contains(&item.children_selector()));
        let flashes = flashes(&page);
        assert_eq!(flashes.len(), 1);
        assert!(flashes[0].contains(&context.messages().request_failed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_click_while_pending_sends_once() {
        let (transport, page, context) = context();
        let item = comment(42, "bob");
        insert_thread(&page, 42, 0);
        transport.set_latency(Duration::from_secs(2));
        page.answer_confirm(true);
        page.answer_confirm(true);

        let first = {
            let context = context.clone();
            let item = item.clone();
            tokio::spawn(async move { context.delete_comment(&item).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(context.is_pending(&(&item).into()));

        let second = assert_ok!(context.delete_comment(&item).await);
        assert_eq!(second, ActionOutcome::AlreadyPending);

        let first = assert_ok!(first.await.expect("delete task panicked"));
        assert_eq!(first, ActionOutcome::Completed);
        assert_eq!(transport.posts().len(), 1);
        assert_eq!(page.questions().len(), 1);
        assert!(!context.is_pending(&(&item).into()));
    }

    #[test]
    fn test_reply_then_cancel_restores_default() {
        let (_, page, context) = context();
        let mut form = context.reply_form(config().comment_post_url);
        let item = comment(7, "alice");

        form.reply_to(&item);
        assert_eq!(form.action(), item.reply_url);
        assert_eq!(form_action(&page), Some(item.reply_url.clone()));
        assert_eq!(
            page.text_of(&Selector::id(regions::REPLY_INFO)).as_deref(),
            Some("Reply to alice")
        );
        assert_eq!(
            page.is_visible(&Selector::id(regions::REPLY_CANCEL_BUTTON)),
            Some(true)
        );

        form.cancel();
        assert_eq!(*form.state(), ReplyState::Idle);
        assert_eq!(form_action(&page), Some(config().comment_post_url));
        assert_eq!(
            page.text_of(&Selector::id(regions::REPLY_INFO)).as_deref(),
            Some("")
        );
        assert_eq!(
            page.is_visible(&Selector::id(regions::REPLY_CANCEL_BUTTON)),
            Some(false)
        );
    }

    #[test]
    fn test_reply_is_idempotent_and_overwrites_target() {
        let (_, page, context) = context();
        let mut form = context.reply_form(config().comment_post_url);
        let first = comment(7, "alice");
        let second = comment(8, "carol");

        form.reply_to(&first);
        let state = form.state().clone();
        form.reply_to(&first);
        assert_eq!(*form.state(), state);
        assert_eq!(form_action(&page), Some(first.reply_url.clone()));

        form.reply_to(&second);
        assert_eq!(form_action(&page), Some(second.reply_url.clone()));
        assert_eq!(
            page.text_of(&Selector::id(regions::REPLY_INFO)).as_deref(),
            Some("Reply to carol")
        );

        form.cancel();
        form.cancel();
        assert_eq!(form_action(&page), Some(config().comment_post_url));
    }
}

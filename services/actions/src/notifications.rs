use common::{ClientResult, Page, Transport};

use crate::context::{ActionContext, ActionOutcome, ActionRequest};
use crate::models::NotificationItem;

impl<T: Transport, P: Page> ActionContext<T, P> {
    /// Mark a notification as checked and remove it from the page
    ///
    /// Sent without confirmation; no flash on success.
    pub async fn check_notification(
        &self,
        notification: &NotificationItem,
    ) -> ClientResult<ActionOutcome> {
        let request = ActionRequest {
            key: notification.into(),
            url: &notification.check_url,
            confirm: None,
            success_flash: None,
        };

        self.perform(request, |page| {
            page.remove(&notification.selector());
        })
        .await
    }
}

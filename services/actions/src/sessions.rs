use common::{ClientResult, Page, Transport};

use crate::context::{ActionContext, ActionOutcome, ActionRequest};
use crate::models::SessionItem;

impl<T: Transport, P: Page> ActionContext<T, P> {
    /// Terminate one of the user's sessions after confirmation
    pub async fn terminate_session(&self, session: &SessionItem) -> ClientResult<ActionOutcome> {
        let messages = self.messages().clone();
        let request = ActionRequest {
            key: session.into(),
            url: &session.terminate_url,
            confirm: Some(messages.are_you_sure_terminate_session.as_str()),
            success_flash: Some(messages.session_terminated_success.as_str()),
        };

        self.perform(request, |page| {
            page.remove(&session.selector());
        })
        .await
    }
}

//! Shared request flow of the click handlers

use std::sync::Arc;

use common::{Category, ClientResult, Flasher, Messages, Page, PageConfig, Transport};
use tracing::{debug, info, warn};

use crate::guard::InFlight;
use crate::models::ItemKey;

/// What a click ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The request succeeded and the page was updated
    Completed,
    /// The user declined the confirmation; nothing was sent
    Declined,
    /// A request for the same item is still in flight; nothing was sent
    AlreadyPending,
}

/// Steps of a single state-changing action
pub(crate) struct ActionRequest<'a> {
    pub key: ItemKey,
    pub url: &'a str,
    pub confirm: Option<&'a str>,
    pub success_flash: Option<&'a str>,
}

/// Everything a handler needs, injected once at bind time
pub struct ActionContext<T: Transport, P: Page> {
    transport: Arc<T>,
    page: Arc<P>,
    flasher: Flasher<P>,
    messages: Arc<Messages>,
    in_flight: InFlight,
}

impl<T: Transport, P: Page> ActionContext<T, P> {
    pub fn new(transport: Arc<T>, page: Arc<P>, config: &PageConfig) -> Self {
        let flasher = Flasher::new(Arc::clone(&page), config.flash_delay());
        Self {
            transport,
            page,
            flasher,
            messages: Arc::new(config.messages.clone()),
            in_flight: InFlight::new(),
        }
    }

    pub fn page(&self) -> &Arc<P> {
        &self.page
    }

    pub fn messages(&self) -> &Arc<Messages> {
        &self.messages
    }

    pub fn flasher(&self) -> &Flasher<P> {
        &self.flasher
    }

    pub fn is_pending(&self, key: &ItemKey) -> bool {
        self.in_flight.is_pending(key)
    }

    /// Guard, confirm, send, then apply `on_success` only if the server agreed
    ///
    /// On failure the page is left untouched and a danger flash reports it.
    pub(crate) async fn perform(
        &self,
        request: ActionRequest<'_>,
        on_success: impl FnOnce(&P),
    ) -> ClientResult<ActionOutcome> {
        let Some(_guard) = self.in_flight.try_begin(request.key.clone()) else {
            debug!("Ignoring repeated click on {:?}", request.key);
            return Ok(ActionOutcome::AlreadyPending);
        };

        if let Some(question) = request.confirm {
            if !self.page.confirm(question) {
                debug!("Action on {:?} declined", request.key);
                return Ok(ActionOutcome::Declined);
            }
        }

        match self.transport.post_protected(request.url).await {
            Ok(()) => {
                info!("Action on {:?} succeeded", request.key);
                on_success(self.page.as_ref());
                if let Some(message) = request.success_flash {
                    self.flasher.flash(message, Category::Danger);
                }
                Ok(ActionOutcome::Completed)
            }
            Err(e) => {
                warn!("Action on {:?} failed: {}", request.key, e);
                self.flasher.flash(&self.messages.request_failed, Category::Danger);
                Err(e)
            }
        }
    }
}

// Implement Clone for ActionContext without requiring T: Clone or P: Clone
impl<T: Transport, P: Page> Clone for ActionContext<T, P> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            page: Arc::clone(&self.page),
            flasher: self.flasher.clone(),
            messages: Arc::clone(&self.messages),
            in_flight: self.in_flight.clone(),
        }
    }
}

//! Start-up check that cookies are enabled

use tracing::warn;

use crate::messages::Messages;
use crate::page::Page;

/// Alert the user once if the page cannot store cookies
///
/// Returns whether cookies are enabled. Nothing is enforced beyond the alert.
pub fn check_cookies_enabled<P: Page + ?Sized>(page: &P, messages: &Messages) -> bool {
    let enabled = page.cookies_enabled();
    if !enabled {
        warn!("Cookies are disabled, session-bound actions will be rejected");
        page.alert(&messages.cookies_required);
    }
    enabled
}

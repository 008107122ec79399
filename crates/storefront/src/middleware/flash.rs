//! Session-backed notice queue (flash messages).
//!
//! Business-rule conflicts (duplicate email, out of stock, duplicate
//! product name) surface as user-facing notices: a handler queues them
//! here and redirects; the next page view drains the queue into its
//! response.

use tower_sessions::Session;

use crate::models::session_keys;

/// Queue a user-facing notice for the next page view.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push_notice(
    session: &Session,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut notices: Vec<String> = session
        .get(session_keys::NOTICES)
        .await?
        .unwrap_or_default();
    notices.push(message.into());
    session.insert(session_keys::NOTICES, notices).await
}

/// Drain all queued notices.
///
/// Session errors deliberately drain to an empty list: a page render never
/// fails because a notice could not be read.
pub async fn take_notices(session: &Session) -> Vec<String> {
    session
        .remove::<Vec<String>>(session_keys::NOTICES)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

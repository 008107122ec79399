//! Admin permission management command.
//!
//! Accounts always register as plain users; admin rights are granted from
//! the operator's shell, never through the web surface.

use clementine_core::{Email, Permission};
use clementine_storefront::db::{UserRepository, create_pool};

use super::{CommandError, database_url};

/// Set the permission level of the user registered under `email`.
///
/// # Errors
///
/// Returns `CommandError::UnknownUser` if no user exists for the email,
/// and database/connection errors otherwise.
pub async fn set_permission(email: &str, permission: Permission) -> Result<(), CommandError> {
    let database_url = database_url()?;
    let email = Email::parse(email)?;

    let pool = create_pool(&database_url).await?;
    let users = UserRepository::new(&pool);

    let user = users
        .get_by_email(&email)
        .await?
        .ok_or_else(|| CommandError::UnknownUser(email.to_string()))?;

    users.set_permission(user.id, permission).await?;

    tracing::info!(user_id = %user.id, %permission, "Permission updated");
    Ok(())
}

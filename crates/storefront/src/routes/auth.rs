//! Authentication route handlers.
//!
//! Registration, login, and logout. Form actions answer with redirects;
//! business-rule conflicts become notices on the page they redirect to.

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{self, AppError};
use crate::middleware::{clear_current_user, push_notice, set_current_user, take_notices};
use crate::middleware::auth::RequireUser;
use crate::models::{CurrentUser, User};
use crate::routes::session_error;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Notice shown when registering an email that already has an account.
const NOTICE_EMAIL_TAKEN: &str =
    "There is already an account registered under this email, please log in instead.";

/// Notice shown when logging in with an unregistered email.
const NOTICE_UNKNOWN_EMAIL: &str =
    "There is no user registered under this email, please try again.";

/// Notice shown when the password does not match.
const NOTICE_WRONG_PASSWORD: &str =
    "The password you typed for this email is incorrect, please try again.";

// =============================================================================
// Form Types
// =============================================================================

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Page payload for the auth forms: just the queued notices.
#[derive(Debug, Serialize)]
pub struct AuthPage {
    pub notices: Vec<String>,
}

// =============================================================================
// Registration
// =============================================================================

/// Display the registration page.
pub async fn register_page(session: Session) -> Json<AuthPage> {
    Json(AuthPage {
        notices: take_notices(&session).await,
    })
}

/// Handle registration form submission.
///
/// A taken email never creates a second account: the caller is redirected
/// to the login page with a notice instead.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool());

    if auth.email_taken(&form.email).await? {
        push_notice(&session, NOTICE_EMAIL_TAKEN)
            .await
            .map_err(session_error)?;
        return Ok(Redirect::to("/login").into_response());
    }

    match auth.register(&form.email, &form.name, &form.password).await {
        Ok(user) => {
            start_session(&session, &user).await?;
            tracing::info!(user_id = %user.id, "New user registered");
            Ok(Redirect::to("/").into_response())
        }
        // The pre-check raced with another registration
        Err(AuthError::EmailTaken) => {
            push_notice(&session, NOTICE_EMAIL_TAKEN)
                .await
                .map_err(session_error)?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(AuthError::InvalidEmail(_)) => {
            push_notice(&session, "Please enter a valid email address.")
                .await
                .map_err(session_error)?;
            Ok(Redirect::to("/register").into_response())
        }
        Err(AuthError::WeakPassword(msg)) => {
            push_notice(&session, msg).await.map_err(session_error)?;
            Ok(Redirect::to("/register").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Login
// =============================================================================

/// Display the login page.
pub async fn login_page(session: Session) -> Json<AuthPage> {
    Json(AuthPage {
        notices: take_notices(&session).await,
    })
}

/// Handle login form submission.
///
/// Unknown email and wrong password get distinct notices.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.email, &form.password).await {
        Ok(user) => {
            start_session(&session, &user).await?;
            tracing::info!(user_id = %user.id, "User logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::UnknownEmail | AuthError::InvalidEmail(_)) => {
            push_notice(&session, NOTICE_UNKNOWN_EMAIL)
                .await
                .map_err(session_error)?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(AuthError::WrongPassword) => {
            push_notice(&session, NOTICE_WRONG_PASSWORD)
                .await
                .map_err(session_error)?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Clears the stored identity and destroys the whole session.
pub async fn logout(RequireUser(user): RequireUser, session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    error::clear_sentry_user();
    tracing::info!(user_id = %user.id, "User logged out");

    Redirect::to("/").into_response()
}

/// Store the authenticated identity in the session and tag Sentry.
async fn start_session(session: &Session, user: &User) -> Result<(), AppError> {
    let current = CurrentUser::from(user);
    set_current_user(session, &current)
        .await
        .map_err(session_error)?;
    error::set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

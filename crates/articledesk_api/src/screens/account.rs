//! Sign-in and sign-up screens.

use super::StatusMessage;
use crate::context::AppContext;
use articledesk_core::{AccountError, AuthError, SessionMarker, SignInForm, SignUpForm, UserId};
use log::warn;

/// Sign-in screen.
#[derive(Debug, Clone, Default)]
pub struct SignInScreen {
    pub form: SignInForm,
    status: Option<StatusMessage>,
}

impl SignInScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Validates, signs in remotely and caches the session marker.
    pub fn submit(&mut self, ctx: &AppContext) -> Option<SessionMarker> {
        match ctx.accounts().sign_in(&self.form) {
            Ok(marker) => {
                self.status = Some(StatusMessage::success("Login successful! Redirecting..."));
                Some(marker)
            }
            Err(err) => {
                self.status = Some(StatusMessage::error(failure_message("Login", &err)));
                None
            }
        }
    }
}

/// Account creation screen.
#[derive(Debug, Clone, Default)]
pub struct SignUpScreen {
    pub form: SignUpForm,
    status: Option<StatusMessage>,
}

impl SignUpScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Validates and creates the account remotely.
    pub fn submit(&mut self, ctx: &AppContext) -> Option<UserId> {
        match ctx.accounts().sign_up(&self.form) {
            Ok(user_id) => {
                self.status = Some(StatusMessage::success(
                    "Account created successfully! Check your email to confirm your account.",
                ));
                Some(user_id)
            }
            Err(err) => {
                self.status = Some(StatusMessage::error(failure_message("Signup", &err)));
                None
            }
        }
    }
}

/// Validation and service rejections read verbatim; anything unexpected is
/// prefixed with `"<action> failed: "`.
fn failure_message(action: &str, err: &AccountError) -> String {
    match err {
        AccountError::Validation(err) => err.to_string(),
        AccountError::Auth(AuthError::Rejected(message)) => message.clone(),
        other => {
            warn!("event=screen_action module=api action={action} status=error error={other}");
            format!("{action} failed: {other}")
        }
    }
}

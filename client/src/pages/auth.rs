//! Login, registration and logout

use tracing::info;

use crate::app::state::AppContext;
use crate::authn::session::SessionStoreExt;
use crate::errors::QuickOpsError;
use crate::forms::credentials::CredentialsForm;
use crate::notify::{Notice, Notifier};
use crate::storage::session::Session;

pub const ACCOUNT_NOT_ACTIVE: &str = "Account is not active.";

/// Sign in. Inactive accounts get no session.
pub async fn login(
    ctx: &AppContext,
    form: &CredentialsForm,
    notifier: &dyn Notifier,
) -> Result<Session, QuickOpsError> {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(e) => {
            notifier.notify(Notice::error(e.to_string()));
            return Err(e.into());
        }
    };

    let response = match ctx.http_client.login(&credentials).await {
        Ok(response) => response,
        Err(e) => {
            notifier.notify(Notice::error(e.user_message("Login failed")));
            return Err(e);
        }
    };

    if !response.user.active {
        notifier.notify(Notice::error(ACCOUNT_NOT_ACTIVE));
        return Err(QuickOpsError::Rejected(ACCOUNT_NOT_ACTIVE.to_string()));
    }

    let session = Session::new(response.user.clone(), response.bearer().map(str::to_string));
    ctx.session.sign_in(session.clone()).await?;
    notifier.notify(Notice::success("Logged in!"));
    Ok(session)
}

/// Create an account. Does not sign in.
pub async fn register(
    ctx: &AppContext,
    form: &CredentialsForm,
    notifier: &dyn Notifier,
) -> Result<(), QuickOpsError> {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(e) => {
            notifier.notify(Notice::error(e.to_string()));
            return Err(e.into());
        }
    };

    match ctx.http_client.register(&credentials).await {
        Ok(response) => {
            info!("Registered user {}", response.user.id);
            notifier.notify(Notice::success("Account created! Please log in."));
            Ok(())
        }
        Err(e) => {
            notifier.notify(Notice::error(e.user_message("Registration failed")));
            Err(e)
        }
    }
}

pub async fn logout(ctx: &AppContext, notifier: &dyn Notifier) -> Result<(), QuickOpsError> {
    ctx.session.clear().await?;
    notifier.notify(Notice::info("Logged out"));
    Ok(())
}

use tracing::{error, info};

use super::form::{FormErrors, SubmitOutcome};
use super::Page;
use crate::error::AppError;
use crate::guard::AuthGuard;
use crate::models::LoginRequest;
use crate::navigation::{Navigator, routes};
use crate::policy;
use crate::session::SessionStore;

const LOGIN_FAILED: &str = "Login failed. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<LoginRequest, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("email", "Email", &self.email);
        errors.require("password", "Password", &self.password);
        errors.into_result()?;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

pub struct SignInPage<'a> {
    page: Page<'a>,
    store: &'a SessionStore,
}

impl<'a> SignInPage<'a> {
    /// Visitors who already hold a session are sent to their home instead.
    pub fn mount(page: Page<'a>, store: &'a SessionStore) -> Option<Self> {
        page.admit(&AuthGuard::guest_only())
            .then_some(Self { page, store })
    }

    pub async fn submit(&self, form: &SignInForm) -> SubmitOutcome {
        let req = match form.validate() {
            Ok(req) => req,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match self.sign_in(&req).await {
            Ok(home) => {
                self.page.nav.push(home);
                SubmitOutcome::Saved
            }
            Err(e) => {
                error!("Login failed for {}: {}", req.email, e);
                SubmitOutcome::Failed(e.user_message(LOGIN_FAILED))
            }
        }
    }

    async fn sign_in(&self, req: &LoginRequest) -> Result<&'static str, AppError> {
        let res = self.page.api.login(req).await?;
        self.store.store_login(&res.token, &res.user).await?;
        info!("signed in as {} ({})", res.user.email, res.user.role);
        Ok(policy::resolve_home_path(&res.user.role()))
    }
}

/// Forgets the stored session and returns to the sign-in page.
pub async fn sign_out(store: &SessionStore, nav: &dyn Navigator) -> Result<(), AppError> {
    store.clear_auth_data().await?;
    info!("signed out");
    nav.replace(routes::SIGN_IN);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::MockTransport;
    use crate::api::mock::Method;
    use crate::navigation::{HistoryNavigator, NavKind};
    use crate::pages::testing::{self, signed_in};
    use crate::policy::Role;
    use crate::session::SessionContext;
    use crate::storage::MemoryStorage;

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::new()))
    }

    fn credentials() -> SignInForm {
        SignInForm {
            email: "grace@example.com".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn successful_login_stores_session_and_goes_home() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            Method::Post,
            "/login",
            json!({"token": "tok-9", "user": {"id": 3, "name": "Grace",
                   "email": "grace@example.com", "role": "instructor"}}),
        );
        let api = testing::api(&mock);
        let store = store();
        let ctx = SessionContext::default();
        let nav = HistoryNavigator::new();

        let page = SignInPage::mount(Page::new(&api, &ctx, &nav), &store).unwrap();
        assert_eq!(page.submit(&credentials()).await, SubmitOutcome::Saved);

        let stored = store.load_context().await.unwrap();
        assert_eq!(stored.token.as_deref(), Some("tok-9"));
        assert_eq!(stored.role, Some(Role::Instructor));
        assert_eq!(stored.user.unwrap().name, "Grace");
        let entries = nav.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, NavKind::Push);
        assert_eq!(entries[0].path, "/instructor");
    }

    #[tokio::test]
    async fn failed_login_shows_backend_message_or_fallback() {
        let mock = Arc::new(MockTransport::new());
        mock.fail(Method::Post, "/login", 401, Some("Invalid credentials"))
            .fail(Method::Post, "/login", 500, None);
        let api = testing::api(&mock);
        let store = store();
        let ctx = SessionContext::default();
        let nav = HistoryNavigator::new();
        let page = SignInPage::mount(Page::new(&api, &ctx, &nav), &store).unwrap();

        assert_eq!(
            page.submit(&credentials()).await,
            SubmitOutcome::Failed("Invalid credentials".to_string())
        );
        assert_eq!(
            page.submit(&credentials()).await,
            SubmitOutcome::Failed(LOGIN_FAILED.to_string())
        );
        assert_eq!(store.get_auth_token().await.unwrap(), "");
        assert!(nav.entries().is_empty());
    }

    #[tokio::test]
    async fn blank_fields_never_reach_backend() {
        let mock = Arc::new(MockTransport::new());
        let api = testing::api(&mock);
        let store = store();
        let ctx = SessionContext::default();
        let nav = HistoryNavigator::new();
        let page = SignInPage::mount(Page::new(&api, &ctx, &nav), &store).unwrap();

        match page.submit(&SignInForm::default()).await {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(errors.get("email"), Some("Email is required"));
                assert_eq!(errors.get("password"), Some("Password is required"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn signed_in_visitors_skip_the_form() {
        let mock = Arc::new(MockTransport::new());
        let api = testing::api(&mock);
        let store = store();
        let ctx = signed_in("student");
        let nav = HistoryNavigator::new();

        assert!(SignInPage::mount(Page::new(&api, &ctx, &nav), &store).is_none());
        assert_eq!(nav.last_path().as_deref(), Some("/student"));
    }

    #[tokio::test]
    async fn sign_out_clears_and_replaces() {
        let store = store();
        store
            .store_login("tok", &signed_in("admin").user.unwrap())
            .await
            .unwrap();
        let nav = HistoryNavigator::new();

        sign_out(&store, &nav).await.unwrap();

        assert_eq!(store.load_context().await.unwrap(), SessionContext::default());
        assert_eq!(nav.entries()[0].kind, NavKind::Replace);
        assert_eq!(nav.last_path().as_deref(), Some("/auth/signin"));
    }
}

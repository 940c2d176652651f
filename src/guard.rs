use tracing::info;

use crate::navigation::{Navigator, routes};
use crate::policy::{Access, Role};
use crate::session::SessionContext;

/// Mount-time gate for a page. One synchronous check against the stored
/// session; the backend is not consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthGuard {
    pub require_role: Option<Role>,
    pub redirect_if_authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    Redirect(&'static str),
}

impl AuthGuard {
    pub fn signed_in() -> Self {
        Self::default()
    }

    pub fn require(role: Role) -> Self {
        Self {
            require_role: Some(role),
            redirect_if_authenticated: false,
        }
    }

    /// For sign-in style pages: visitors who already have a session are
    /// sent home.
    pub fn guest_only() -> Self {
        Self {
            require_role: None,
            redirect_if_authenticated: true,
        }
    }

    pub fn check(&self, ctx: &SessionContext) -> GuardOutcome {
        if self.redirect_if_authenticated {
            return match ctx.home_path() {
                Some(home) if ctx.is_authenticated() => GuardOutcome::Redirect(home),
                _ => GuardOutcome::Proceed,
            };
        }

        match ctx.authorize(self.require_role.as_ref()) {
            Access::Allow => GuardOutcome::Proceed,
            Access::Deny(reason) => {
                info!("auth guard denied: {}", reason);
                GuardOutcome::Redirect(routes::SIGN_IN)
            }
        }
    }

    /// Runs the check and performs the redirect. Returns whether the page
    /// may continue loading.
    pub fn enforce(&self, ctx: &SessionContext, nav: &dyn Navigator) -> bool {
        match self.check(ctx) {
            GuardOutcome::Proceed => true,
            GuardOutcome::Redirect(path) => {
                nav.replace(path);
                false
            }
        }
    }
}

//! Page controllers. Each page is mounted against the stored session (the
//! guard runs first and may redirect), then loads its data through the API
//! and hands back a view state for the front end to render.

pub mod batches;
pub mod categories;
pub mod class_sessions;
pub mod courses;
pub mod dashboards;
pub mod form;
pub mod instructors;
pub mod list;
pub mod signin;
pub mod students;

use crate::api::LmsApi;
use crate::guard::AuthGuard;
use crate::navigation::{Navigator, routes};
use crate::policy::Role;
use crate::session::SessionContext;

pub use form::{FormErrors, SubmitOutcome};
pub use list::{ListView, WidgetState};

/// Everything a page needs from its surroundings.
#[derive(Clone, Copy)]
pub struct Page<'a> {
    pub api: &'a LmsApi,
    pub session: &'a SessionContext,
    pub nav: &'a dyn Navigator,
}

impl<'a> Page<'a> {
    pub fn new(api: &'a LmsApi, session: &'a SessionContext, nav: &'a dyn Navigator) -> Self {
        Self { api, session, nav }
    }

    /// Runs the guard; `false` means a redirect was issued.
    pub fn admit(&self, guard: &AuthGuard) -> bool {
        guard.enforce(self.session, self.nav)
    }
}

/// The page tree a shared page is mounted under. Decides who may see it and
/// where it returns after a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Admin,
    Instructor,
}

impl Area {
    pub fn for_role(role: &Role) -> Option<Self> {
        match role {
            Role::Admin => Some(Area::Admin),
            Role::Instructor => Some(Area::Instructor),
            _ => None,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Area::Admin => Role::Admin,
            Area::Instructor => Role::Instructor,
        }
    }

    pub fn guard(&self) -> AuthGuard {
        AuthGuard::require(self.role())
    }

    pub fn courses_path(&self) -> &'static str {
        match self {
            Area::Admin => routes::ADMIN_COURSES,
            Area::Instructor => routes::INSTRUCTOR_COURSES,
        }
    }

    pub fn students_path(&self) -> &'static str {
        match self {
            Area::Admin => routes::ADMIN_STUDENTS,
            Area::Instructor => routes::INSTRUCTOR_STUDENTS,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::api::{LmsApi, MockTransport};
    use crate::models::UserProfile;
    use crate::policy::Role;
    use crate::session::SessionContext;

    pub fn api(mock: &Arc<MockTransport>) -> LmsApi {
        LmsApi::new(mock.clone())
    }

    pub fn signed_in(role: &str) -> SessionContext {
        SessionContext {
            token: Some("test-token".to_string()),
            role: Some(Role::parse(role)),
            user: Some(UserProfile {
                id: "1".to_string(),
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                role: role.to_string(),
            }),
        }
    }
}

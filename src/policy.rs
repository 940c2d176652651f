//! Role-based routing policy. The portal never makes access decisions of its
//! own beyond this: it reads the stored role and picks where to send the
//! visitor. The backend enforces the real rules on every request.

use std::fmt;

use crate::navigation::routes;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Instructor,
    Student,
    Other(String),
}

impl Role {
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "instructor" => Role::Instructor,
            "student" => Role::Student,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
            Role::Student => "student",
            Role::Other(value) => value,
        }
    }

    /// Admins and instructors run meetings; students only attend.
    pub fn hosts_meetings(&self) -> bool {
        matches!(self, Role::Admin | Role::Instructor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn resolve_home_path(role: &Role) -> &'static str {
    match role {
        Role::Admin => routes::ADMIN_HOME,
        Role::Instructor => routes::INSTRUCTOR_HOME,
        _ => routes::STUDENT_HOME,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    MissingToken,
    MissingRole,
    RoleMismatch { required: Role, actual: Role },
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::MissingToken => f.write_str("not signed in"),
            DenyReason::MissingRole => f.write_str("no role stored for this session"),
            DenyReason::RoleMismatch { required, actual } => {
                write!(f, "requires role {} but signed in as {}", required, actual)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny(DenyReason),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }
}

pub fn authorize(token: Option<&str>, role: Option<&Role>, required: Option<&Role>) -> Access {
    if token.is_none_or(str::is_empty) {
        return Access::Deny(DenyReason::MissingToken);
    }
    let Some(role) = role else {
        return Access::Deny(DenyReason::MissingRole);
    };
    match required {
        Some(required) if required != role => Access::Deny(DenyReason::RoleMismatch {
            required: required.clone(),
            actual: role.clone(),
        }),
        _ => Access::Allow,
    }
}

use std::sync::Mutex;

use tracing::info;

pub mod routes {
    pub const SIGN_IN: &str = "/auth/signin";
    pub const ADMIN_HOME: &str = "/admin";
    pub const INSTRUCTOR_HOME: &str = "/instructor";
    pub const STUDENT_HOME: &str = "/student";

    pub const ADMIN_CATEGORIES: &str = "/admin/course-categories";
    pub const ADMIN_COURSES: &str = "/admin/courses";
    pub const ADMIN_INSTRUCTORS: &str = "/admin/instructors";
    pub const ADMIN_STUDENTS: &str = "/admin/students";
    pub const INSTRUCTOR_COURSES: &str = "/instructor/courses";
    pub const INSTRUCTOR_STUDENTS: &str = "/instructor/students";

    pub fn course_batches(course_id: i64) -> String {
        format!("/admin/courses/{}/batches", course_id)
    }

    pub fn course_class_sessions(course_id: i64) -> String {
        format!("/admin/courses/{}/class-sessions", course_id)
    }

    pub fn meeting(room: &str) -> String {
        format!("/meeting/{}", room)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKind {
    Push,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub kind: NavKind,
    pub path: String,
}

/// Where pages send the visitor next. `push` adds a history entry,
/// `replace` swaps the current one (used for redirects).
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
    fn replace(&self, path: &str);
}

/// Records every navigation request in order.
#[derive(Default)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<NavEntry>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<NavEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last_path(&self) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .map(|entry| entry.path.clone())
    }

    fn record(&self, kind: NavKind, path: &str) {
        info!("navigate ({:?}) -> {}", kind, path);
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(NavEntry {
                kind,
                path: path.to_string(),
            });
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, path: &str) {
        self.record(NavKind::Push, path);
    }

    fn replace(&self, path: &str) {
        self.record(NavKind::Replace, path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_keeps_order() {
        let nav = HistoryNavigator::new();
        assert_eq!(nav.last_path(), None);

        nav.push("/admin/courses");
        nav.replace(routes::SIGN_IN);

        assert_eq!(
            nav.entries(),
            vec![
                NavEntry { kind: NavKind::Push, path: "/admin/courses".to_string() },
                NavEntry { kind: NavKind::Replace, path: "/auth/signin".to_string() },
            ]
        );
        assert_eq!(nav.last_path().as_deref(), Some("/auth/signin"));
    }

    #[test]
    fn route_builders() {
        assert_eq!(routes::course_batches(7), "/admin/courses/7/batches");
        assert_eq!(routes::course_class_sessions(7), "/admin/courses/7/class-sessions");
        assert_eq!(routes::meeting("abc"), "/meeting/abc");
    }
}

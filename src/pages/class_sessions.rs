use tracing::error;

use super::form::{FormErrors, SubmitOutcome};
use super::list::{ListView, WidgetState};
use super::Page;
use crate::guard::AuthGuard;
use crate::models::{ClassSession, Course, GenerateSessionsRequest, Weekday};
use crate::policy::Role;

/// Recurrence the backend expands into concrete sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateForm {
    pub start_date: String,
    pub days_of_week: Vec<Weekday>,
    pub start_time: String,
    pub end_time: String,
    pub duration_weeks: String,
}

impl GenerateForm {
    pub fn validate(&self, course_id: i64) -> Result<GenerateSessionsRequest, FormErrors> {
        let mut errors = FormErrors::new();
        errors.parse_date("start_date", "Start date", &self.start_date);
        if self.days_of_week.is_empty() {
            errors.add("days_of_week", "Select at least one day");
        }
        let from = errors.parse_time("start_time", "Start time", &self.start_time);
        let to = errors.parse_time("end_time", "End time", &self.end_time);
        if let (Some(from), Some(to)) = (from, to) {
            if to <= from {
                errors.add("end_time", "End time must be after the start time");
            }
        }
        let weeks = errors.positive_number("duration_weeks", "Duration", &self.duration_weeks);
        errors.into_result()?;

        Ok(GenerateSessionsRequest {
            course_id,
            start_date: self.start_date.trim().to_string(),
            days_of_week: self.days_of_week.clone(),
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            duration_weeks: weeks.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassSessionsView {
    pub course: WidgetState<Course>,
    pub sessions: ListView<ClassSession>,
}

pub struct ClassSessionsPage<'a> {
    page: Page<'a>,
}

impl<'a> ClassSessionsPage<'a> {
    pub fn mount(page: Page<'a>) -> Option<Self> {
        page.admit(&AuthGuard::require(Role::Admin))
            .then_some(Self { page })
    }

    /// Course header and session list, fetched side by side.
    pub async fn load(&self, course_id: i64) -> ClassSessionsView {
        let (course, sessions) = tokio::join!(
            self.page.api.get_course(course_id),
            self.page.api.list_class_sessions(course_id)
        );
        ClassSessionsView {
            course: WidgetState::from_result(course, "Failed to load course details"),
            sessions: ListView::from_result(sessions, "Failed to load class sessions"),
        }
    }

    /// Asks the backend to expand the recurrence. The page stays put and the
    /// caller refetches on success.
    pub async fn generate(&self, course_id: i64, form: &GenerateForm) -> SubmitOutcome {
        let req = match form.validate(course_id) {
            Ok(req) => req,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        match self.page.api.generate_class_sessions(&req).await {
            Ok(()) => SubmitOutcome::Saved,
            Err(e) => {
                error!("Failed to generate class sessions: {}", e);
                SubmitOutcome::Failed(e.user_message("Failed to generate class sessions."))
            }
        }
    }

    /// Generates the meeting link for one session and returns the refreshed
    /// list.
    pub async fn start_meeting(
        &self,
        course_id: i64,
        session_id: i64,
    ) -> Result<ListView<ClassSession>, String> {
        if let Err(e) = self.page.api.start_meeting(session_id).await {
            error!("Failed to start meeting for session {}: {}", session_id, e);
            return Err(e.user_message("Failed to start meeting"));
        }
        Ok(ListView::from_result(
            self.page.api.list_class_sessions(course_id).await,
            "Failed to load class sessions",
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::MockTransport;
    use crate::api::mock::Method;
    use crate::navigation::HistoryNavigator;
    use crate::pages::testing::{self, signed_in};

    #[tokio::test]
    async fn load_keeps_sessions_when_course_fails() {
        let mock = Arc::new(MockTransport::new());
        mock.fail(Method::Get, "/courses/4", 500, None).on(
            Method::Get,
            "/courses/4/class-sessions",
            json!({"data": [{"id": 1, "class_date": "2025-02-03", "start_time": "10:00",
                             "end_time": "11:00", "class_status": "scheduled"}]}),
        );
        let api = testing::api(&mock);
        let ctx = signed_in("admin");
        let nav = HistoryNavigator::new();
        let page = ClassSessionsPage::mount(Page::new(&api, &ctx, &nav)).unwrap();

        let view = page.load(4).await;
        assert_eq!(
            view.course,
            WidgetState::Failed("Failed to load course details".to_string())
        );
        assert_eq!(view.sessions.items().len(), 1);
    }

    #[tokio::test]
    async fn generate_sends_recurrence() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Post, "/class-sessions/generate", json!({}));
        let api = testing::api(&mock);
        let ctx = signed_in("admin");
        let nav = HistoryNavigator::new();
        let page = ClassSessionsPage::mount(Page::new(&api, &ctx, &nav)).unwrap();

        let form = GenerateForm {
            start_date: "2025-02-03".to_string(),
            days_of_week: vec![Weekday::Tuesday, Weekday::Thursday],
            start_time: "10:00".to_string(),
            end_time: "11:00".to_string(),
            duration_weeks: "8".to_string(),
        };
        assert_eq!(page.generate(4, &form).await, SubmitOutcome::Saved);
        assert_eq!(
            mock.requests_to(Method::Post, "/class-sessions/generate")[0].body,
            Some(json!({
                "course_id": 4,
                "start_date": "2025-02-03",
                "days_of_week": ["Tuesday", "Thursday"],
                "start_time": "10:00",
                "end_time": "11:00",
                "duration_weeks": 8
            }))
        );
        assert!(nav.entries().is_empty());
    }

    #[tokio::test]
    async fn start_meeting_refetches_sessions() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Post, "/class-sessions/7/start-meeting", json!({}))
            .on(Method::Get, "/courses/4/class-sessions", json!({"data": []}));
        let api = testing::api(&mock);
        let ctx = signed_in("admin");
        let nav = HistoryNavigator::new();
        let page = ClassSessionsPage::mount(Page::new(&api, &ctx, &nav)).unwrap();

        assert_eq!(page.start_meeting(4, 7).await, Ok(ListView::Empty));

        let mock = Arc::new(MockTransport::new());
        mock.fail(Method::Post, "/class-sessions/7/start-meeting", 500, None);
        let api = testing::api(&mock);
        let page = ClassSessionsPage::mount(Page::new(&api, &ctx, &nav)).unwrap();
        assert_eq!(
            page.start_meeting(4, 7).await,
            Err("Failed to start meeting".to_string())
        );
    }
}

use super::form::{self, FormErrors, SubmitOutcome};
use super::list::{ListView, WidgetState};
use super::Page;
use crate::guard::AuthGuard;
use crate::models::{Batch, NewBatchRequest, SessionTime, Weekday};
use crate::navigation::routes;
use crate::policy::Role;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchForm {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub session_days: Vec<Weekday>,
    pub session_start_time: String,
    pub session_end_time: String,
}

impl BatchForm {
    pub fn validate(&self, course_id: i64) -> Result<NewBatchRequest, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("name", "Batch name", &self.name);

        let start = errors.parse_date("start_date", "Start date", &self.start_date);
        let end = errors.parse_date("end_date", "End date", &self.end_date);
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                errors.add("end_date", "End date cannot be before the start date");
            }
        }

        if self.session_days.is_empty() {
            errors.add("session_days", "Select at least one session day");
        }

        let from = errors.parse_time("session_start_time", "Start time", &self.session_start_time);
        let to = errors.parse_time("session_end_time", "End time", &self.session_end_time);
        if let (Some(from), Some(to)) = (from, to) {
            if to <= from {
                errors.add("session_end_time", "End time must be after the start time");
            }
        }

        errors.into_result()?;

        let mut days = self.session_days.clone();
        days.sort_by_key(|d| Weekday::ALL.iter().position(|w| w == d));
        days.dedup();

        Ok(NewBatchRequest {
            course_id,
            name: self.name.trim().to_string(),
            start_date: self.start_date.trim().to_string(),
            end_date: self.end_date.trim().to_string(),
            session_days: days,
            session_time: SessionTime {
                start: self.session_start_time.trim().to_string(),
                end: self.session_end_time.trim().to_string(),
            },
        })
    }
}

pub struct BatchesPage<'a> {
    page: Page<'a>,
}

impl<'a> BatchesPage<'a> {
    pub fn mount(page: Page<'a>) -> Option<Self> {
        page.admit(&AuthGuard::require(Role::Admin))
            .then_some(Self { page })
    }

    pub async fn load(&self, course_id: i64) -> ListView<Batch> {
        ListView::from_result(
            self.page.api.list_batches(course_id).await,
            "Failed to load batches",
        )
    }

    /// Batch with its enrolled students and scheduled sessions.
    pub async fn details(&self, batch_id: i64) -> WidgetState<Batch> {
        WidgetState::from_result(
            self.page.api.get_batch(batch_id).await,
            "Failed to load batch data",
        )
    }

    pub async fn create(&self, course_id: i64, form: &BatchForm) -> SubmitOutcome {
        let req = match form.validate(course_id) {
            Ok(req) => req,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        form::submit(
            self.page.nav,
            &routes::course_batches(course_id),
            "Failed to create batch.",
            self.page.api.create_batch(&req),
        )
        .await
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

    fn evening() -> BatchForm {
        BatchForm {
            name: "Evening".to_string(),
            start_date: "2025-01-06".to_string(),
            end_date: "2025-03-28".to_string(),
            session_days: vec![Weekday::Wednesday, Weekday::Monday, Weekday::Monday],
            session_start_time: "18:00".to_string(),
            session_end_time: "19:30".to_string(),
        }
    }

    #[test]
    fn rejects_inverted_ranges() {
        let errors = BatchForm {
            end_date: "2025-01-01".to_string(),
            session_end_time: "17:00".to_string(),
            session_days: vec![],
            ..evening()
        }
        .validate(1)
        .unwrap_err();
        assert!(errors.get("end_date").is_some());
        assert!(errors.get("session_end_time").is_some());
        assert_eq!(errors.get("session_days"), Some("Select at least one session day"));
    }

    #[tokio::test]
    async fn create_sends_session_time_and_sorted_days() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Post, "/batches", json!({}));
        let api = testing::api(&mock);
        let ctx = signed_in("admin");
        let nav = HistoryNavigator::new();
        let page = BatchesPage::mount(Page::new(&api, &ctx, &nav)).unwrap();

        assert_eq!(page.create(5, &evening()).await, SubmitOutcome::Saved);
        assert_eq!(
            mock.requests_to(Method::Post, "/batches")[0].body,
            Some(json!({
                "course_id": 5,
                "name": "Evening",
                "start_date": "2025-01-06",
                "end_date": "2025-03-28",
                "session_days": ["Monday", "Wednesday"],
                "session_time": {"start": "18:00", "end": "19:30"}
            }))
        );
        assert_eq!(nav.last_path().as_deref(), Some("/admin/courses/5/batches"));
    }

    #[tokio::test]
    async fn details_failure_message() {
        let mock = Arc::new(MockTransport::new());
        mock.fail(Method::Get, "/batches/3", 404, None);
        let api = testing::api(&mock);
        let ctx = signed_in("admin");
        let nav = HistoryNavigator::new();
        let page = BatchesPage::mount(Page::new(&api, &ctx, &nav)).unwrap();

        assert_eq!(
            page.details(3).await,
            WidgetState::Failed("Failed to load batch data".to_string())
        );
    }
}

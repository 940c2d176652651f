use super::form::{self, SubmitOutcome};
use super::instructors::PersonForm;
use super::list::ListView;
use super::{Area, Page};
use crate::models::Student;

pub struct StudentsPage<'a> {
    page: Page<'a>,
    area: Area,
}

impl<'a> StudentsPage<'a> {
    pub fn mount(page: Page<'a>, area: Area) -> Option<Self> {
        page.admit(&area.guard()).then_some(Self { page, area })
    }

    pub async fn load(&self) -> ListView<Student> {
        ListView::from_result(self.page.api.list_students().await, "Failed to load students")
    }

    pub async fn create(&self, form: &PersonForm) -> SubmitOutcome {
        let req = match form.validate() {
            Ok(req) => req,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        form::submit(
            self.page.nav,
            self.area.students_path(),
            "Failed to create student. Please try again.",
            self.page.api.create_student(&req),
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

    #[tokio::test]
    async fn create_student_posts_form() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Post, "/students", json!({}));
        let api = testing::api(&mock);
        let ctx = signed_in("admin");
        let nav = HistoryNavigator::new();
        let page = StudentsPage::mount(Page::new(&api, &ctx, &nav), Area::Admin).unwrap();

        let outcome = page
            .create(&PersonForm {
                name: "Rae".to_string(),
                email: "rae@example.com".to_string(),
                phone: "555-0101".to_string(),
                secondary_phone: "555-0102".to_string(),
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(nav.last_path().as_deref(), Some("/admin/students"));
        assert_eq!(
            mock.requests_to(Method::Post, "/students")[0].body,
            Some(json!({
                "name": "Rae",
                "email": "rae@example.com",
                "phone": "555-0101",
                "secondary_phone": "555-0102"
            }))
        );
    }

    #[tokio::test]
    async fn empty_list_renders_no_records() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Get, "/students", json!({"data": []}));
        let api = testing::api(&mock);
        let ctx = signed_in("instructor");
        let nav = HistoryNavigator::new();
        let page = StudentsPage::mount(Page::new(&api, &ctx, &nav), Area::Instructor).unwrap();

        assert_eq!(page.load().await, ListView::Empty);
    }

    #[tokio::test]
    async fn rejected_list_renders_error() {
        let mock = Arc::new(MockTransport::new());
        mock.fail(Method::Get, "/students", 500, None);
        let api = testing::api(&mock);
        let ctx = signed_in("admin");
        let nav = HistoryNavigator::new();
        let page = StudentsPage::mount(Page::new(&api, &ctx, &nav), Area::Admin).unwrap();

        assert_eq!(
            page.load().await,
            ListView::Failed("Failed to load students".to_string())
        );
    }
}

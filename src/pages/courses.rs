use super::form::{self, FormErrors, SubmitOutcome, syllabus_lines};
use super::list::{ListView, WidgetState};
use super::{Area, Page};
use crate::models::{Category, Course, CourseRequest, Instructor};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseForm {
    pub title: String,
    pub description: String,
    pub instructor_id: String,
    pub category_id: String,
    pub duration_weeks: String,
    /// One syllabus entry per line.
    pub syllabus: String,
}

impl CourseForm {
    pub fn validate(&self) -> Result<CourseRequest, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("title", "Title", &self.title);

        let instructor_id = match self.instructor_id.trim() {
            "" => {
                errors.add("instructor_id", "Instructor is required");
                None
            }
            raw => raw.parse::<i64>().ok().or_else(|| {
                errors.add("instructor_id", "Select an instructor from the list");
                None
            }),
        };
        let category_id = match self.category_id.trim() {
            "" => None,
            raw => raw.parse::<i64>().ok().or_else(|| {
                errors.add("category_id", "Select a category from the list");
                None
            }),
        };
        let duration_weeks = errors.positive_number("duration_weeks", "Duration", &self.duration_weeks);

        errors.into_result()?;
        Ok(CourseRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            instructor_id: instructor_id.unwrap_or_default(),
            category_id,
            duration_weeks: duration_weeks.unwrap_or_default(),
            syllabus: syllabus_lines(&self.syllabus),
        })
    }
}

impl From<&Course> for CourseForm {
    fn from(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone().unwrap_or_default(),
            instructor_id: course
                .instructor_id
                .or_else(|| course.instructor.as_ref().and_then(|i| i.id))
                .map(|id| id.to_string())
                .unwrap_or_default(),
            category_id: course
                .category_id
                .or_else(|| course.category.as_ref().and_then(|c| c.id))
                .map(|id| id.to_string())
                .unwrap_or_default(),
            duration_weeks: course
                .duration_weeks
                .map(|w| w.to_string())
                .unwrap_or_default(),
            syllabus: course.syllabus.join("\n"),
        }
    }
}

/// Option lists a course form offers.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseOptions {
    pub instructors: ListView<Instructor>,
    pub categories: ListView<Category>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseEditor {
    pub course: WidgetState<Course>,
    pub form: CourseForm,
    pub options: CourseOptions,
}

pub struct CoursesPage<'a> {
    page: Page<'a>,
    area: Area,
}

impl<'a> CoursesPage<'a> {
    pub fn mount(page: Page<'a>, area: Area) -> Option<Self> {
        page.admit(&area.guard()).then_some(Self { page, area })
    }

    pub async fn load(&self) -> ListView<Course> {
        ListView::from_result(self.page.api.list_courses().await, "Failed to load courses")
    }

    pub async fn load_one(&self, id: i64) -> WidgetState<Course> {
        WidgetState::from_result(self.page.api.get_course(id).await, "Failed to load course")
    }

    pub async fn options(&self) -> CourseOptions {
        let (instructors, categories) = tokio::join!(
            self.page.api.list_instructors(),
            self.page.api.list_categories()
        );
        CourseOptions {
            instructors: ListView::from_result(instructors, "Failed to load instructors"),
            categories: ListView::from_result(categories, "Failed to load categories"),
        }
    }

    /// Loads the course and the option lists side by side and pre-fills the
    /// form from the course.
    pub async fn editor(&self, id: i64) -> CourseEditor {
        let (course, options) = tokio::join!(self.load_one(id), self.options());
        let form = course.ready().map(CourseForm::from).unwrap_or_default();
        CourseEditor {
            course,
            form,
            options,
        }
    }

    pub async fn create(&self, form: &CourseForm) -> SubmitOutcome {
        let req = match form.validate() {
            Ok(req) => req,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        form::submit(
            self.page.nav,
            self.area.courses_path(),
            "Failed to create course.",
            self.page.api.create_course(&req),
        )
        .await
    }

    pub async fn update(&self, id: i64, form: &CourseForm) -> SubmitOutcome {
        let req = match form.validate() {
            Ok(req) => req,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        form::submit(
            self.page.nav,
            self.area.courses_path(),
            "Failed to update course.",
            self.page.api.update_course(id, &req),
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

    fn calculus() -> CourseForm {
        CourseForm {
            title: "Calculus".to_string(),
            description: "Limits and derivatives".to_string(),
            instructor_id: "4".to_string(),
            category_id: String::new(),
            duration_weeks: "10".to_string(),
            syllabus: "Limits\nDerivatives\n".to_string(),
        }
    }

    #[test]
    fn validation_reports_each_field() {
        let errors = CourseForm {
            instructor_id: "abc".to_string(),
            duration_weeks: "-1".to_string(),
            ..CourseForm::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("instructor_id"), Some("Select an instructor from the list"));
        assert_eq!(errors.get("duration_weeks"), Some("Duration must be a positive number"));
    }

    #[tokio::test]
    async fn instructor_area_returns_to_instructor_list() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Post, "/courses", json!({}));
        let api = testing::api(&mock);
        let ctx = signed_in("instructor");
        let nav = HistoryNavigator::new();

        let page = CoursesPage::mount(Page::new(&api, &ctx, &nav), Area::Instructor).unwrap();
        assert_eq!(page.create(&calculus()).await, SubmitOutcome::Saved);

        assert_eq!(nav.last_path().as_deref(), Some("/instructor/courses"));
        let body = mock.requests_to(Method::Post, "/courses")[0].body.clone().unwrap();
        assert_eq!(body["instructor_id"], 4);
        assert_eq!(body["duration_weeks"], 10);
        assert_eq!(body["syllabus"], json!(["Limits", "Derivatives"]));
        assert!(body.get("category_id").is_none());
    }

    #[tokio::test]
    async fn admin_area_needs_admin() {
        let mock = Arc::new(MockTransport::new());
        let api = testing::api(&mock);
        let ctx = signed_in("instructor");
        let nav = HistoryNavigator::new();

        assert!(CoursesPage::mount(Page::new(&api, &ctx, &nav), Area::Admin).is_none());
        assert_eq!(nav.last_path().as_deref(), Some("/auth/signin"));
    }

    #[tokio::test]
    async fn editor_prefills_and_tolerates_missing_options() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            Method::Get,
            "/courses/2",
            json!({"data": {"id": 2, "title": "Art", "instructor": {"id": 8, "name": "Mo"},
                            "duration_weeks": 6, "syllabus": ["Color", "Form"]}}),
        )
        .on(Method::Get, "/instructors", json!({"data": [{"id": 8, "name": "Mo", "email": "mo@x.io"}]}))
        .fail(Method::Get, "/course-categories", 500, None);
        let api = testing::api(&mock);
        let ctx = signed_in("admin");
        let nav = HistoryNavigator::new();
        let page = CoursesPage::mount(Page::new(&api, &ctx, &nav), Area::Admin).unwrap();

        let editor = page.editor(2).await;
        assert_eq!(editor.form.instructor_id, "8");
        assert_eq!(editor.form.duration_weeks, "6");
        assert_eq!(editor.form.syllabus, "Color\nForm");
        assert_eq!(editor.options.instructors.items().len(), 1);
        assert_eq!(
            editor.options.categories.error(),
            Some("Failed to load categories")
        );
    }
}

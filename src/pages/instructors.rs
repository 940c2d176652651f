use super::form::{self, FormErrors, SubmitOutcome};
use super::list::ListView;
use super::Page;
use crate::guard::AuthGuard;
use crate::models::{Instructor, NewPersonRequest};
use crate::navigation::routes;
use crate::policy::Role;

/// Sign-up form shared by instructors and students.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub secondary_phone: String,
}

impl PersonForm {
    pub fn validate(&self) -> Result<NewPersonRequest, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("name", "Name", &self.name);
        errors.require_email("email", &self.email);
        errors.require("phone", "Phone", &self.phone);
        errors.into_result()?;

        let secondary = self.secondary_phone.trim();
        Ok(NewPersonRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            secondary_phone: (!secondary.is_empty()).then(|| secondary.to_string()),
        })
    }
}

pub struct InstructorsPage<'a> {
    page: Page<'a>,
}

impl<'a> InstructorsPage<'a> {
    pub fn mount(page: Page<'a>) -> Option<Self> {
        page.admit(&AuthGuard::require(Role::Admin))
            .then_some(Self { page })
    }

    pub async fn load(&self) -> ListView<Instructor> {
        ListView::from_result(
            self.page.api.list_instructors().await,
            "Failed to load instructors",
        )
    }

    pub async fn create(&self, form: &PersonForm) -> SubmitOutcome {
        let req = match form.validate() {
            Ok(req) => req,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        form::submit(
            self.page.nav,
            routes::ADMIN_INSTRUCTORS,
            "Failed to create instructor. Please try again.",
            self.page.api.create_instructor(&req),
        )
        .await
    }
}

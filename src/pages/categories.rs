use tracing::error;

use super::form::{self, FormErrors, SubmitOutcome};
use super::list::{ListView, WidgetState};
use super::Page;
use crate::guard::AuthGuard;
use crate::models::{Category, CategoryRequest};
use crate::navigation::routes;
use crate::policy::Role;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<CategoryRequest, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("name", "Name", &self.name);
        errors.into_result()?;
        Ok(CategoryRequest {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }
}

pub struct CategoriesPage<'a> {
    page: Page<'a>,
}

impl<'a> CategoriesPage<'a> {
    pub fn mount(page: Page<'a>) -> Option<Self> {
        page.admit(&AuthGuard::require(Role::Admin))
            .then_some(Self { page })
    }

    pub async fn load(&self) -> ListView<Category> {
        ListView::from_result(
            self.page.api.list_categories().await,
            "Failed to load categories",
        )
    }

    pub async fn load_one(&self, id: i64) -> WidgetState<Category> {
        WidgetState::from_result(
            self.page.api.get_category(id).await,
            "Failed to load category",
        )
    }

    pub async fn create(&self, form: &CategoryForm) -> SubmitOutcome {
        let req = match form.validate() {
            Ok(req) => req,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        form::submit(
            self.page.nav,
            routes::ADMIN_CATEGORIES,
            "Failed to create category.",
            self.page.api.create_category(&req),
        )
        .await
    }

    pub async fn update(&self, id: i64, form: &CategoryForm) -> SubmitOutcome {
        let req = match form.validate() {
            Ok(req) => req,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        form::submit(
            self.page.nav,
            routes::ADMIN_CATEGORIES,
            "Failed to update category.",
            self.page.api.update_category(id, &req),
        )
        .await
    }

    /// Deletes and hands back the refreshed list. A failed delete leaves the
    /// list untouched and reports the error.
    pub async fn delete(&self, id: i64) -> Result<ListView<Category>, String> {
        if let Err(e) = self.page.api.delete_category(id).await {
            error!("Failed to delete category {}: {}", id, e);
            return Err(e.user_message("Failed to delete category."));
        }
        Ok(self.load().await)
    }
}

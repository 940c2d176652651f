use anyhow::{Result, bail};

use lms_portal::pages::WidgetState;
use lms_portal::pages::categories::{CategoriesPage, CategoryForm};
use lms_portal::models::Category;

use super::{App, finish, print_list, truncate};

fn mount(app: &App) -> Result<CategoriesPage<'_>> {
    CategoriesPage::mount(app.page()).ok_or_else(|| app.denied())
}

fn print_row(category: &Category) {
    println!(
        "#{:<4} {:<30} {}",
        category.id,
        truncate(&category.name, 30),
        truncate(category.description.as_deref().unwrap_or(""), 50)
    );
}

pub async fn list(app: &App) -> Result<()> {
    let page = mount(app)?;
    print_list(&page.load().await, "No categories found.", print_row);
    Ok(())
}

pub async fn show(app: &App, id: i64) -> Result<()> {
    let page = mount(app)?;
    match page.load_one(id).await {
        WidgetState::Ready(category) => {
            println!("Category #{}: {}", category.id, category.name);
            if let Some(desc) = category.description.as_deref().filter(|d| !d.is_empty()) {
                println!("\nDescription:");
                for line in desc.lines() {
                    println!("  {}", line);
                }
            }
            Ok(())
        }
        WidgetState::Failed(message) => bail!(message),
        WidgetState::Loading => Ok(()),
    }
}

pub async fn create(app: &App, name: &str, description: &str) -> Result<()> {
    let page = mount(app)?;
    let form = CategoryForm {
        name: name.to_string(),
        description: description.to_string(),
    };
    finish(page.create(&form).await, "Category created.")
}

pub async fn edit(app: &App, id: i64, name: Option<String>, description: Option<String>) -> Result<()> {
    let page = mount(app)?;
    let mut form = match page.load_one(id).await {
        WidgetState::Ready(category) => CategoryForm::from(&category),
        WidgetState::Failed(message) => bail!(message),
        WidgetState::Loading => CategoryForm::default(),
    };
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(description) = description {
        form.description = description;
    }
    finish(page.update(id, &form).await, "Category updated.")
}

pub async fn delete(app: &App, id: i64) -> Result<()> {
    let page = mount(app)?;
    match page.delete(id).await {
        Ok(remaining) => {
            println!("Deleted category #{}.", id);
            print_list(&remaining, "No categories left.", print_row);
            Ok(())
        }
        Err(message) => bail!(message),
    }
}

use anyhow::Result;

use lms_portal::models::Person;
use lms_portal::pages::instructors::{InstructorsPage, PersonForm};
use lms_portal::pages::students::StudentsPage;

use super::{App, finish, print_list, truncate};

pub fn form(name: String, email: String, phone: String, secondary_phone: Option<String>) -> PersonForm {
    PersonForm {
        name,
        email,
        phone,
        secondary_phone: secondary_phone.unwrap_or_default(),
    }
}

fn print_row(person: &Person) {
    println!(
        "#{:<4} {:<28} {:<32} {:<15} {}",
        person.id,
        truncate(&person.name, 28),
        truncate(&person.email, 32),
        person.phone.as_deref().unwrap_or("-"),
        person.status.as_deref().unwrap_or("")
    );
}

pub async fn list_instructors(app: &App) -> Result<()> {
    let page = InstructorsPage::mount(app.page()).ok_or_else(|| app.denied())?;
    print_list(&page.load().await, "No instructors found.", print_row);
    Ok(())
}

pub async fn create_instructor(app: &App, form: &PersonForm) -> Result<()> {
    let page = InstructorsPage::mount(app.page()).ok_or_else(|| app.denied())?;
    finish(page.create(form).await, "Instructor created.")
}

pub async fn list_students(app: &App) -> Result<()> {
    let page = StudentsPage::mount(app.page(), app.area()).ok_or_else(|| app.denied())?;
    print_list(&page.load().await, "No students found.", print_row);
    Ok(())
}

pub async fn create_student(app: &App, form: &PersonForm) -> Result<()> {
    let page = StudentsPage::mount(app.page(), app.area()).ok_or_else(|| app.denied())?;
    finish(page.create(form).await, "Student created.")
}

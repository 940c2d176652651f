use anyhow::{Result, bail};

use lms_portal::pages::WidgetState;
use lms_portal::pages::batches::{BatchForm, BatchesPage};

use super::{App, finish, print_list, truncate};

fn mount(app: &App) -> Result<BatchesPage<'_>> {
    BatchesPage::mount(app.page()).ok_or_else(|| app.denied())
}

pub async fn list(app: &App, course_id: i64) -> Result<()> {
    let page = mount(app)?;
    print_list(&page.load(course_id).await, "No batches found.", |batch| {
        println!(
            "#{:<4} {:<24} {} -> {}  {}",
            batch.id,
            truncate(&batch.name, 24),
            batch.start_date,
            batch.end_date,
            batch.schedule_label()
        );
    });
    Ok(())
}

pub async fn show(app: &App, batch_id: i64) -> Result<()> {
    let page = mount(app)?;
    let batch = match page.details(batch_id).await {
        WidgetState::Ready(batch) => batch,
        WidgetState::Failed(message) => bail!(message),
        WidgetState::Loading => return Ok(()),
    };

    println!("Batch #{}: {}", batch.id, batch.name);
    println!("Course: #{}", batch.course_id);
    println!("Runs: {} -> {}", batch.start_date, batch.end_date);
    println!("Schedule: {}", batch.schedule_label());

    println!("\nStudents:");
    if batch.students.is_empty() {
        println!("  (none)");
    }
    for student in &batch.students {
        println!("  #{:<4} {:<28} {}", student.id, truncate(&student.name, 28), student.email);
    }

    println!("\nClass sessions:");
    if batch.class_sessions.is_empty() {
        println!("  (none)");
    }
    for session in &batch.class_sessions {
        println!(
            "  #{:<4} {} {}-{} [{}]",
            session.id,
            session.date,
            session.start_time,
            session.end_time,
            session.class_status.label()
        );
    }
    Ok(())
}

pub async fn create(app: &App, course_id: i64, form: &BatchForm) -> Result<()> {
    let page = mount(app)?;
    finish(page.create(course_id, form).await, "Batch created.")
}

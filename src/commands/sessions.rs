use anyhow::{Result, bail};

use lms_portal::models::ClassSession;
use lms_portal::pages::ListView;
use lms_portal::pages::class_sessions::{ClassSessionsPage, GenerateForm};

use super::{App, finish, print_list, print_widget, truncate};

fn mount(app: &App) -> Result<ClassSessionsPage<'_>> {
    ClassSessionsPage::mount(app.page()).ok_or_else(|| app.denied())
}

fn print_sessions(sessions: &ListView<ClassSession>) {
    print_list(sessions, "No class sessions found.", |s| {
        println!(
            "#{:<4} {} {}-{}  {:<11} {:<24} {}",
            s.id,
            s.date,
            s.start_time,
            s.end_time,
            s.class_status.label(),
            truncate(s.topic.as_deref().unwrap_or(""), 24),
            s.meeting_link.as_deref().unwrap_or("")
        );
    });
}

pub async fn list(app: &App, course_id: i64) -> Result<()> {
    let page = mount(app)?;
    let view = page.load(course_id).await;
    print_widget(&view.course, |course| println!("Course #{}: {}\n", course.id, course.title));
    print_sessions(&view.sessions);
    Ok(())
}

pub async fn generate(app: &App, course_id: i64, form: &GenerateForm) -> Result<()> {
    let page = mount(app)?;
    finish(page.generate(course_id, form).await, "Class sessions generated.")?;
    print_sessions(&page.load(course_id).await.sessions);
    Ok(())
}

pub async fn start_meeting(app: &App, course_id: i64, session_id: i64) -> Result<()> {
    let page = mount(app)?;
    match page.start_meeting(course_id, session_id).await {
        Ok(sessions) => {
            println!("Meeting link generated for session #{}.", session_id);
            print_sessions(&sessions);
            Ok(())
        }
        Err(message) => bail!(message),
    }
}

use anyhow::{Result, bail};

use lms_portal::meeting::{BrowserLinkWidget, MeetingPage, MeetingState};

use super::App;

pub async fn join(app: &App, room: &str) -> Result<()> {
    let page = MeetingPage::new(app.page());
    let state = page.open_room(room).await;
    enter(app, &page, state).await
}

pub async fn join_session(app: &App, session_id: i64) -> Result<()> {
    let page = MeetingPage::new(app.page());
    let state = page.open_session(session_id).await;
    enter(app, &page, state).await
}

async fn enter(app: &App, page: &MeetingPage<'_>, state: MeetingState) -> Result<()> {
    match state {
        MeetingState::Valid(ticket) => {
            println!("Joining as {}", ticket.display_name);
            let widget = BrowserLinkWidget::new(app.config.meeting_domain.clone());
            page.run(&ticket, &widget).await?;
            println!("Meeting ended.");
            Ok(())
        }
        MeetingState::Invalid(reason) => bail!(reason),
        MeetingState::Error(message) => bail!(message),
        MeetingState::Loading => Ok(()),
    }
}

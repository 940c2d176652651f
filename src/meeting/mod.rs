//! Joining a live class: resolve and validate the room, hand the participant
//! to the conference widget, and keep the class-session status in step with
//! the widget's lifecycle.

pub mod widget;

use tracing::{debug, error, info, warn};

use crate::error::AppError;
use crate::models::ClassStatus;
use crate::navigation::routes;
use crate::pages::Page;

pub use widget::{BrowserLinkWidget, MeetingEvent, MeetingWidget};

const INVALID_ROOM: &str = "Invalid room ID.";
const NOT_AUTHORIZED: &str = "You are not authorized to join this session.";
const SESSION_NOT_FOUND: &str = "Session not found.";
const SESSION_INFO_FAILED: &str = "Failed to load session info.";

#[derive(Debug, Clone, PartialEq)]
pub enum MeetingState {
    Loading,
    Valid(JoinTicket),
    Invalid(String),
    Error(String),
}

/// Everything the widget needs to put this participant in the room.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinTicket {
    pub room_name: String,
    pub display_name: String,
    pub email: String,
    pub session_id: Option<i64>,
}

pub struct MeetingPage<'a> {
    page: Page<'a>,
}

impl<'a> MeetingPage<'a> {
    pub fn new(page: Page<'a>) -> Self {
        Self { page }
    }

    /// Entry by room identifier (`/meeting/{room}`).
    pub async fn open_room(&self, room: &str) -> MeetingState {
        self.validate(room, None).await
    }

    /// Entry by class-session id: the room is looked up first.
    pub async fn open_session(&self, session_id: i64) -> MeetingState {
        match self.page.api.resolve_room(session_id).await {
            Ok(info) => self.validate(&info.room_name, Some(session_id)).await,
            Err(e) => {
                error!("Error fetching session info for {}: {}", session_id, e);
                MeetingState::Error(SESSION_INFO_FAILED.to_string())
            }
        }
    }

    async fn validate(&self, room: &str, session_id: Option<i64>) -> MeetingState {
        let room = room.trim();
        if room.is_empty() {
            return MeetingState::Invalid(INVALID_ROOM.to_string());
        }
        let Some(user) = self.page.session.user.as_ref() else {
            self.page.nav.replace(routes::SIGN_IN);
            return MeetingState::Invalid(NOT_AUTHORIZED.to_string());
        };

        match self.page.api.check_session(room).await {
            Ok(check) => match check.meeting_link {
                Some(link) if check.valid && !link.is_empty() => MeetingState::Valid(JoinTicket {
                    room_name: link,
                    display_name: user.display_name(),
                    email: user.email.clone(),
                    session_id: check.session_id.or(session_id),
                }),
                _ => {
                    info!("{} may not join room {}", user.email, room);
                    MeetingState::Invalid(NOT_AUTHORIZED.to_string())
                }
            },
            Err(e) => {
                warn!("session check for room {} failed: {}", room, e);
                MeetingState::Error(e.user_message(SESSION_NOT_FOUND))
            }
        }
    }

    /// Mounts the widget and follows it until the participant leaves, then
    /// sends them to their home page.
    pub async fn run(&self, ticket: &JoinTicket, widget: &dyn MeetingWidget) -> Result<(), AppError> {
        let mut events = widget
            .join_room(&ticket.room_name, &ticket.display_name, &ticket.email)
            .await?;
        let hosting = self
            .page
            .session
            .role
            .as_ref()
            .is_some_and(|role| role.hosts_meetings());

        while let Some(event) = events.recv().await {
            debug!("meeting event {:?} in {}", event, ticket.room_name);
            match event {
                MeetingEvent::Ready if hosting => {
                    self.signal(ticket, ClassStatus::InProgress).await;
                }
                MeetingEvent::Ready => {}
                MeetingEvent::Closed => {
                    if hosting {
                        self.signal(ticket, ClassStatus::Completed).await;
                    }
                    break;
                }
            }
        }

        let home = self.page.session.home_path().unwrap_or(routes::SIGN_IN);
        self.page.nav.push(home);
        Ok(())
    }

    /// Ends the meeting from the portal side. A running `run` sees `Closed`
    /// and finishes as if the participant had left.
    pub async fn hang_up(&self, widget: &dyn MeetingWidget) -> Result<(), AppError> {
        info!("ending meeting");
        widget.hang_up().await
    }

    // Status updates never interrupt the meeting itself.
    async fn signal(&self, ticket: &JoinTicket, status: ClassStatus) {
        let Some(session_id) = ticket.session_id else {
            debug!("no class session for room {}, status not sent", ticket.room_name);
            return;
        };
        match self.page.api.set_session_status(session_id, status).await {
            Ok(()) => info!("class session {} is now {}", session_id, status.label()),
            Err(e) => error!("Failed to mark class session {} {}: {}", session_id, status.label(), e),
        }
    }
}

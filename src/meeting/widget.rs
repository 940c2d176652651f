use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Url;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingEvent {
    /// The conference is up and the participant is in the room.
    Ready,
    /// The participant left or the conference ended.
    Closed,
}

/// The embedded conference. Joining hands back the widget's lifecycle events;
/// the stream ends after `Closed`.
#[async_trait]
pub trait MeetingWidget: Send + Sync {
    async fn join_room(
        &self,
        room: &str,
        display_name: &str,
        email: &str,
    ) -> Result<mpsc::Receiver<MeetingEvent>, AppError>;

    /// Leave the current room. The joined stream then yields `Closed`.
    /// Without a joined room this does nothing.
    async fn hang_up(&self) -> Result<(), AppError>;
}

/// Terminal stand-in for the embedded conference: prints a join link with the
/// participant's details in the fragment, reports `Ready`, and reports
/// `Closed` once the user presses Enter or Ctrl-C.
pub struct BrowserLinkWidget {
    domain: String,
    leave: Mutex<Option<oneshot::Sender<()>>>,
}

impl BrowserLinkWidget {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            leave: Mutex::new(None),
        }
    }

    pub fn join_url(&self, room: &str, display_name: &str, email: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&format!("https://{}", self.domain.trim_end_matches('/')))
            .map_err(|e| AppError::Widget(format!("bad meeting domain {}: {}", self.domain, e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Widget(format!("bad meeting domain {}", self.domain)))?
            .pop_if_empty()
            .push(room);

        let fragment = [
            ("userInfo.displayName", serde_json::to_string(display_name)?),
            ("userInfo.email", serde_json::to_string(email)?),
            ("config.startWithAudioMuted", "true".to_string()),
            ("config.disableModeratorIndicator", "true".to_string()),
            ("interfaceConfig.DISABLE_JOIN_LEAVE_NOTIFICATIONS", "true".to_string()),
        ];
        url.set_fragment(Some(&encode_fragment(&fragment)?));
        Ok(url)
    }
}

// Conference clients decode the fragment with decodeURIComponent, so spaces
// must travel as %20 rather than the form-style '+'.
fn encode_fragment(pairs: &[(&str, String)]) -> Result<String, AppError> {
    let mut scratch = Url::parse("http://fragment.invalid/")
        .map_err(|e| AppError::Widget(e.to_string()))?;
    scratch.query_pairs_mut().extend_pairs(pairs);
    Ok(scratch.query().unwrap_or_default().replace('+', "%20"))
}

#[async_trait]
impl MeetingWidget for BrowserLinkWidget {
    async fn join_room(
        &self,
        room: &str,
        display_name: &str,
        email: &str,
    ) -> Result<mpsc::Receiver<MeetingEvent>, AppError> {
        let url = self.join_url(room, display_name, email)?;
        info!("joining room {} as {}", room, display_name);
        println!("Meeting is open at:\n  {}\nPress Enter to leave.", url);

        let (hang_up_tx, hang_up_rx) = oneshot::channel();
        *self.leave.lock().unwrap_or_else(|e| e.into_inner()) = Some(hang_up_tx);

        // A blocking stdin read can't be cancelled, so it gets its own thread
        // that the runtime never waits on.
        let (enter_tx, enter_rx) = oneshot::channel();
        std::thread::spawn(move || {
            let mut line = String::new();
            let _ = std::io::stdin().read_line(&mut line);
            let _ = enter_tx.send(());
        });

        let (tx, rx) = mpsc::channel(4);
        tokio::spawn(async move {
            if tx.send(MeetingEvent::Ready).await.is_err() {
                return;
            }
            tokio::select! {
                _ = enter_rx => debug!("leave requested from the terminal"),
                _ = hang_up_rx => debug!("hung up"),
                _ = tokio::signal::ctrl_c() => debug!("interrupted, leaving meeting"),
            }
            let _ = tx.send(MeetingEvent::Closed).await;
        });
        Ok(rx)
    }

    async fn hang_up(&self) -> Result<(), AppError> {
        let leave = self.leave.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(leave) = leave {
            info!("hanging up");
            let _ = leave.send(());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_carries_participant_in_fragment() {
        let widget = BrowserLinkWidget::new("meet.example.org");
        let url = widget
            .join_url("math-101-room", "Ada Lovelace - student", "ada@example.com")
            .unwrap();

        assert_eq!(url.host_str(), Some("meet.example.org"));
        assert_eq!(url.path(), "/math-101-room");
        let fragment = url.fragment().unwrap();
        assert!(fragment.contains("userInfo.displayName=%22Ada%20Lovelace%20-%20student%22"));
        assert!(fragment.contains("userInfo.email=%22ada%40example.com%22"));
        assert!(fragment.contains("config.startWithAudioMuted=true"));
        assert!(!fragment.contains('+'));
    }

    #[test]
    fn room_names_are_escaped_into_one_segment() {
        let widget = BrowserLinkWidget::new("meet.example.org/");
        let url = widget.join_url("a/b c", "x", "y").unwrap();
        assert_eq!(url.path(), "/a%2Fb%20c");
    }

    #[tokio::test]
    async fn hang_up_closes_the_room() {
        let widget = BrowserLinkWidget::new("meet.example.org");
        widget.hang_up().await.unwrap();

        let mut events = widget.join_room("algebra-8", "Ada", "ada@example.com").await.unwrap();
        assert_eq!(events.recv().await, Some(MeetingEvent::Ready));

        widget.hang_up().await.unwrap();
        assert_eq!(events.recv().await, Some(MeetingEvent::Closed));
        assert_eq!(events.recv().await, None);
    }

    #[test]
    fn runtime_shuts_down_without_waiting_on_stdin() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let widget = BrowserLinkWidget::new("meet.example.org");
        rt.block_on(async {
            let mut events = widget.join_room("algebra-8", "Ada", "ada@example.com").await.unwrap();
            assert_eq!(events.recv().await, Some(MeetingEvent::Ready));
            widget.hang_up().await.unwrap();
            assert_eq!(events.recv().await, Some(MeetingEvent::Closed));
        });

        let started = std::time::Instant::now();
        drop(rt);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }
}

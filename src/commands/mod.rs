pub mod auth;
pub mod batches;
pub mod categories;
pub mod courses;
pub mod dashboard;
pub mod meeting;
pub mod people;
pub mod sessions;

use anyhow::{Result, bail};

use lms_portal::api::LmsApi;
use lms_portal::config::Config;
use lms_portal::navigation::HistoryNavigator;
use lms_portal::pages::{Area, ListView, Page, SubmitOutcome, WidgetState};
use lms_portal::session::{SessionContext, SessionStore};

/// What every command works against: the API, the stored session as it was
/// when the command started, and a navigator that records where the page
/// wanted to go.
pub struct App {
    pub config: Config,
    pub api: LmsApi,
    pub store: SessionStore,
    pub session: SessionContext,
    pub nav: HistoryNavigator,
}

impl App {
    pub fn page(&self) -> Page<'_> {
        Page::new(&self.api, &self.session, &self.nav)
    }

    /// Shared pages live under the signed-in user's own tree. Visitors
    /// without a hosting role get the admin tree and its guard turns them
    /// away.
    pub fn area(&self) -> Area {
        self.session
            .role
            .as_ref()
            .and_then(Area::for_role)
            .unwrap_or(Area::Admin)
    }

    pub fn report_navigation(&self) {
        if let Some(path) = self.nav.last_path() {
            println!("-> {}", path);
        }
    }

    /// Called when a page's guard refused to mount.
    pub fn denied(&self) -> anyhow::Error {
        match self.nav.last_path() {
            Some(path) if path == lms_portal::navigation::routes::SIGN_IN => {
                anyhow::anyhow!("Not signed in with a role allowed here. Run 'lms signin' first.")
            }
            Some(path) => anyhow::anyhow!("This page is not available to you (redirected to {}).", path),
            None => anyhow::anyhow!("This page is not available to you."),
        }
    }
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", truncated)
    }
}

/// Prints one line per record, or the empty/error state of the list.
pub fn print_list<T>(view: &ListView<T>, empty: &str, row: impl Fn(&T)) {
    match view {
        ListView::Loading => println!("Loading..."),
        ListView::Empty => println!("{}", empty),
        ListView::Failed(message) => println!("Error: {}", message),
        ListView::Loaded(items) => items.iter().for_each(row),
    }
}

pub fn print_widget<T>(state: &WidgetState<T>, ready: impl Fn(&T)) {
    match state {
        WidgetState::Loading => println!("Loading..."),
        WidgetState::Failed(message) => println!("Error: {}", message),
        WidgetState::Ready(value) => ready(value),
    }
}

pub fn finish(outcome: SubmitOutcome, saved: &str) -> Result<()> {
    match outcome {
        SubmitOutcome::Saved => {
            println!("{}", saved);
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field, message);
            }
            bail!("Please fix the errors above.")
        }
        SubmitOutcome::Failed(message) => bail!(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Introduction to Algebra", 12), "Introduct...");
        assert_eq!(truncate("Äöüßéèêëïîô", 8), "Äöüßé...");
    }
}

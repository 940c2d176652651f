use std::collections::BTreeMap;
use std::future::Future;

use chrono::{NaiveDate, NaiveTime};
use tracing::error;

use crate::error::AppError;
use crate::navigation::Navigator;

/// Field name to message, in field order for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn require(&mut self, field: &'static str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", label));
        }
    }

    pub fn require_email(&mut self, field: &'static str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, "Email is required");
        } else if !value.contains('@') {
            self.add(field, "Please enter a valid email address");
        }
    }

    pub fn parse_date(&mut self, field: &'static str, label: &str, value: &str) -> Option<NaiveDate> {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", label));
            return None;
        }
        match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.add(field, format!("{} must be a date (YYYY-MM-DD)", label));
                None
            }
        }
    }

    pub fn parse_time(&mut self, field: &'static str, label: &str, value: &str) -> Option<NaiveTime> {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", label));
            return None;
        }
        match NaiveTime::parse_from_str(value.trim(), "%H:%M") {
            Ok(time) => Some(time),
            Err(_) => {
                self.add(field, format!("{} must be a time (HH:MM)", label));
                None
            }
        }
    }

    pub fn positive_number(&mut self, field: &'static str, label: &str, value: &str) -> Option<u32> {
        match value.trim().parse::<u32>() {
            Ok(n) if n > 0 => Some(n),
            _ if value.trim().is_empty() => {
                self.add(field, format!("{} is required", label));
                None
            }
            _ => {
                self.add(field, format!("{} must be a positive number", label));
                None
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Accepted by the backend. Pages that leave the form have already
    /// requested navigation; the rest refetch.
    Saved,
    /// Rejected before sending.
    Invalid(FormErrors),
    /// The backend call failed; the form stays as it was.
    Failed(String),
}

/// Sends a validated form and, on success, moves to `then`.
pub async fn submit<Fut>(nav: &dyn Navigator, then: &str, error_message: &str, call: Fut) -> SubmitOutcome
where
    Fut: Future<Output = Result<(), AppError>>,
{
    match call.await {
        Ok(()) => {
            nav.push(then);
            SubmitOutcome::Saved
        }
        Err(e) => {
            error!("{}: {}", error_message, e);
            SubmitOutcome::Failed(e.user_message(error_message))
        }
    }
}

/// Splits free-form syllabus text into ordered, non-empty lines.
pub fn syllabus_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

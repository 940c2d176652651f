use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::class_session::ClassSession;
use super::person::Student;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| {
                day.name().eq_ignore_ascii_case(wanted)
                    || (wanted.len() == 3 && day.name()[..3].eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| format!("Unknown weekday '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub session_days: Vec<Weekday>,
    #[serde(default)]
    pub session_start_time: Option<String>,
    #[serde(default)]
    pub session_end_time: Option<String>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub class_sessions: Vec<ClassSession>,
}

impl Batch {
    pub fn schedule_label(&self) -> String {
        let days = self
            .session_days
            .iter()
            .map(|d| &d.name()[..3])
            .collect::<Vec<_>>()
            .join("/");
        match (&self.session_start_time, &self.session_end_time) {
            (Some(start), Some(end)) => format!("{} {}-{}", days, start, end),
            _ => days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTime {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBatchRequest {
    pub course_id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub session_days: Vec<Weekday>,
    pub session_time: SessionTime,
}

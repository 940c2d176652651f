use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::batch::Weekday;

/// Lifecycle of a class session. The backend owns every transition; the
/// spellings vary between endpoints, hence the aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassStatus {
    #[default]
    #[serde(alias = "scheduled", alias = "pending")]
    NotStarted,
    #[serde(alias = "ongoing")]
    InProgress,
    Completed,
    #[serde(alias = "canceled")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ClassStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ClassStatus::NotStarted => "not started",
            ClassStatus::InProgress => "in progress",
            ClassStatus::Completed => "completed",
            ClassStatus::Cancelled => "cancelled",
            ClassStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSession {
    pub id: i64,
    #[serde(default)]
    pub batch_id: Option<i64>,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(alias = "class_date")]
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, alias = "status")]
    pub class_status: ClassStatus,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub batch: Option<BatchSummary>,
}

impl ClassSession {
    /// The link participants may follow right now. Scheduled sessions can
    /// carry a pre-generated link that must not be offered yet.
    pub fn joinable_link(&self) -> Option<&str> {
        match self.class_status {
            ClassStatus::InProgress => self.meeting_link.as_deref(),
            _ => None,
        }
    }

    pub fn course_title(&self) -> &str {
        self.batch
            .as_ref()
            .and_then(|b| b.course.as_ref())
            .map(|c| c.title.as_str())
            .unwrap_or("-")
    }

    pub fn batch_name(&self) -> &str {
        self.batch.as_ref().map(|b| b.name.as_str()).unwrap_or("-")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub course: Option<CourseSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub instructor: Option<super::course::NamedRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateSessionsRequest {
    pub course_id: i64,
    pub start_date: String,
    pub days_of_week: Vec<Weekday>,
    pub start_time: String,
    pub end_time: String,
    pub duration_weeks: u32,
}

/// Filter accepted by the per-role class listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassFilter {
    #[default]
    All,
    Upcoming,
    Completed,
}

impl ClassFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassFilter::All => "all",
            ClassFilter::Upcoming => "upcoming",
            ClassFilter::Completed => "completed",
        }
    }
}

impl FromStr for ClassFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ClassFilter::All),
            "upcoming" => Ok(ClassFilter::Upcoming),
            "completed" => Ok(ClassFilter::Completed),
            other => Err(format!(
                "Invalid filter '{}'. Must be one of: all, upcoming, completed",
                other
            )),
        }
    }
}

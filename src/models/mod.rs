pub mod batch;
pub mod category;
pub mod class_session;
pub mod course;
pub mod overview;
pub mod person;
pub mod user;

pub use batch::{Batch, NewBatchRequest, SessionTime, Weekday};
pub use category::{Category, CategoryRequest};
pub use class_session::{ClassFilter, ClassSession, ClassStatus, GenerateSessionsRequest};
pub use course::{Course, CourseRequest};
pub use overview::{
    Activity, AdminOverview, Assignment, CourseProgress, InstructorOverview, StudentOverview,
};
pub use person::{Instructor, NewPersonRequest, Person, Student};
pub use user::{LoginRequest, LoginResponse, UserProfile};

use serde::{Deserialize, Deserializer};

/// Some backend ids arrive as numbers and some as strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

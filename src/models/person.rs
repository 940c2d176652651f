use serde::{Deserialize, Serialize};

/// Instructors and students come back from the backend in the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "secondry_phone")]
    pub secondary_phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

pub type Instructor = Person;
pub type Student = Person;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPersonRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_phone: Option<String>,
}

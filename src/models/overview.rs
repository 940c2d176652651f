use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminOverview {
    pub total_students: u64,
    pub total_courses: u64,
    pub total_instructors: u64,
    #[serde(default, rename = "studentGrowth")]
    pub student_growth: f64,
    #[serde(default, rename = "courseDrop")]
    pub course_drop: f64,
    #[serde(default, rename = "instructorGrowth")]
    pub instructor_growth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorOverview {
    pub total_assigned_courses: u64,
    pub total_active_batches: u64,
    pub total_enrolled_students: u64,
    pub upcoming_classes: u64,
    #[serde(default, rename = "coursesGrowth")]
    pub courses_growth: f64,
    #[serde(default, rename = "batchesGrowth")]
    pub batches_growth: f64,
    #[serde(default, rename = "studentsGrowth")]
    pub students_growth: f64,
    #[serde(default, rename = "classesGrowth")]
    pub classes_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentOverview {
    pub enrolled_courses: u64,
    pub completed_courses: u64,
    pub upcoming_classes: u64,
    pub assignment_completion: f64,
    #[serde(default, rename = "enrollmentGrowth")]
    pub enrollment_growth: f64,
    #[serde(default, rename = "completionGrowth")]
    pub completion_growth: f64,
    #[serde(default, rename = "classesGrowth")]
    pub classes_growth: f64,
    #[serde(default, rename = "assignmentGrowth")]
    pub assignment_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseProgress {
    pub id: i64,
    pub title: String,
    pub progress_percentage: f64,
    pub total_classes: u32,
    pub completed_classes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub due_date: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub activity_type: String,
    pub description: String,
    pub timestamp: String,
}

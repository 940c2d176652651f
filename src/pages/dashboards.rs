//! Per-role home pages. Every widget loads on its own and fails on its own.

use super::list::{ListView, WidgetState};
use super::Page;
use crate::guard::AuthGuard;
use crate::models::{
    Activity, AdminOverview, Assignment, ClassFilter, ClassSession, CourseProgress,
    InstructorOverview, StudentOverview,
};
use crate::policy::Role;

#[derive(Debug, Clone, PartialEq)]
pub struct AdminDashboard {
    pub metrics: WidgetState<AdminOverview>,
    pub todays_classes: ListView<ClassSession>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructorDashboard {
    pub metrics: WidgetState<InstructorOverview>,
    pub classes: ListView<ClassSession>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentDashboard {
    pub metrics: WidgetState<StudentOverview>,
    pub classes: ListView<ClassSession>,
    pub progress: ListView<CourseProgress>,
    pub assignments: ListView<Assignment>,
    pub activities: ListView<Activity>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dashboard {
    Admin(AdminDashboard),
    Instructor(InstructorDashboard),
    Student(StudentDashboard),
}

pub async fn admin(page: Page<'_>) -> Option<AdminDashboard> {
    if !page.admit(&AuthGuard::require(Role::Admin)) {
        return None;
    }
    let (metrics, todays) = tokio::join!(
        page.api.admin_overview(),
        page.api.admin_todays_classes()
    );
    Some(AdminDashboard {
        metrics: WidgetState::from_result(metrics, "Error fetching admin data"),
        todays_classes: ListView::from_result(todays, "Failed to load today's classes"),
    })
}

pub async fn instructor(page: Page<'_>, filter: ClassFilter) -> Option<InstructorDashboard> {
    if !page.admit(&AuthGuard::require(Role::Instructor)) {
        return None;
    }
    let (metrics, classes) = tokio::join!(
        page.api.instructor_overview(),
        page.api.instructor_classes(filter)
    );
    Some(InstructorDashboard {
        metrics: WidgetState::from_result(metrics, "Error fetching instructor data"),
        classes: ListView::from_result(classes, "Failed to fetch data"),
    })
}

pub async fn student(page: Page<'_>, filter: ClassFilter) -> Option<StudentDashboard> {
    if !page.admit(&AuthGuard::require(Role::Student)) {
        return None;
    }
    Some(load_student(page, filter).await)
}

async fn load_student(page: Page<'_>, filter: ClassFilter) -> StudentDashboard {
    let (metrics, classes, progress, assignments, activities) = tokio::join!(
        page.api.student_overview(),
        page.api.student_classes(filter),
        page.api.student_course_progress(),
        page.api.student_assignments(),
        page.api.student_recent_activities()
    );
    StudentDashboard {
        metrics: WidgetState::from_result(metrics, "Error fetching student data"),
        classes: ListView::from_result(classes, "Failed to load classes"),
        progress: ListView::from_result(progress, "Failed to load course progress"),
        assignments: ListView::from_result(assignments, "Failed to load assignments"),
        activities: ListView::from_result(activities, "Failed to load recent activities"),
    }
}

/// Home page for whoever is signed in.
pub async fn for_session(page: Page<'_>, filter: ClassFilter) -> Option<Dashboard> {
    if !page.admit(&AuthGuard::signed_in()) {
        return None;
    }
    match page.session.role.as_ref()? {
        Role::Admin => admin(page).await.map(Dashboard::Admin),
        Role::Instructor => instructor(page, filter).await.map(Dashboard::Instructor),
        // Any other role lands on the student home, same as the redirect policy.
        _ => Some(Dashboard::Student(load_student(page, filter).await)),
    }
}

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::ApiTransport;
use super::dto::{self, RoomInfo, SessionValidity, StatusUpdate};
use crate::error::AppError;
use crate::models::*;

/// Typed view of the backend endpoints the portal consumes.
#[derive(Clone)]
pub struct LmsApi {
    transport: Arc<dyn ApiTransport>,
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(value)?)
}

impl LmsApi {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, AppError> {
        let body = self.transport.post("/login", Some(to_body(req)?)).await?;
        Ok(serde_json::from_value(body)?)
    }

    // categories

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        dto::decode_list(self.transport.get("/course-categories", &[]).await?)
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, AppError> {
        let path = format!("/course-categories/{}", id);
        dto::decode_one(self.transport.get(&path, &[]).await?)
    }

    pub async fn create_category(&self, req: &CategoryRequest) -> Result<(), AppError> {
        self.transport
            .post("/course-categories", Some(to_body(req)?))
            .await?;
        info!("category created: {}", req.name);
        Ok(())
    }

    pub async fn update_category(&self, id: i64, req: &CategoryRequest) -> Result<(), AppError> {
        let path = format!("/course-categories/{}", id);
        self.transport.put(&path, to_body(req)?).await?;
        Ok(())
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), AppError> {
        let path = format!("/course-categories/{}", id);
        self.transport.delete(&path).await?;
        info!("category {} deleted", id);
        Ok(())
    }

    // courses

    pub async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        dto::decode_list(self.transport.get("/courses", &[]).await?)
    }

    pub async fn get_course(&self, id: i64) -> Result<Course, AppError> {
        let path = format!("/courses/{}", id);
        dto::decode_one(self.transport.get(&path, &[]).await?)
    }

    pub async fn create_course(&self, req: &CourseRequest) -> Result<(), AppError> {
        self.transport.post("/courses", Some(to_body(req)?)).await?;
        info!("course created: {}", req.title);
        Ok(())
    }

    pub async fn update_course(&self, id: i64, req: &CourseRequest) -> Result<(), AppError> {
        let path = format!("/courses/{}", id);
        self.transport.put(&path, to_body(req)?).await?;
        Ok(())
    }

    // people

    pub async fn list_instructors(&self) -> Result<Vec<Instructor>, AppError> {
        dto::decode_list(self.transport.get("/instructors", &[]).await?)
    }

    pub async fn create_instructor(&self, req: &NewPersonRequest) -> Result<(), AppError> {
        self.transport.post("/instructors", Some(to_body(req)?)).await?;
        info!("instructor created: {}", req.email);
        Ok(())
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        dto::decode_list(self.transport.get("/students", &[]).await?)
    }

    pub async fn create_student(&self, req: &NewPersonRequest) -> Result<(), AppError> {
        self.transport.post("/students", Some(to_body(req)?)).await?;
        info!("student created: {}", req.email);
        Ok(())
    }

    // batches

    pub async fn list_batches(&self, course_id: i64) -> Result<Vec<Batch>, AppError> {
        let path = format!("/batches/course/{}", course_id);
        dto::decode_list(self.transport.get(&path, &[]).await?)
    }

    pub async fn get_batch(&self, id: i64) -> Result<Batch, AppError> {
        let path = format!("/batches/{}", id);
        dto::decode_one(self.transport.get(&path, &[]).await?)
    }

    pub async fn create_batch(&self, req: &NewBatchRequest) -> Result<(), AppError> {
        self.transport.post("/batches", Some(to_body(req)?)).await?;
        info!("batch created: {} (course {})", req.name, req.course_id);
        Ok(())
    }

    // class sessions

    pub async fn list_class_sessions(&self, course_id: i64) -> Result<Vec<ClassSession>, AppError> {
        let path = format!("/courses/{}/class-sessions", course_id);
        dto::decode_list(self.transport.get(&path, &[]).await?)
    }

    pub async fn generate_class_sessions(&self, req: &GenerateSessionsRequest) -> Result<(), AppError> {
        self.transport
            .post("/class-sessions/generate", Some(to_body(req)?))
            .await?;
        info!("class sessions generated for course {}", req.course_id);
        Ok(())
    }

    pub async fn start_meeting(&self, session_id: i64) -> Result<(), AppError> {
        let path = format!("/class-sessions/{}/start-meeting", session_id);
        self.transport.post(&path, None).await?;
        info!("meeting link generated for session {}", session_id);
        Ok(())
    }

    pub async fn set_session_status(&self, session_id: i64, status: ClassStatus) -> Result<(), AppError> {
        let path = format!("/class-sessions/{}/status", session_id);
        let body = to_body(&StatusUpdate {
            class_status: status,
        })?;
        self.transport.put(&path, body).await?;
        Ok(())
    }

    // meetings

    pub async fn resolve_room(&self, session_id: i64) -> Result<RoomInfo, AppError> {
        let path = format!("/courses/class-sessions/{}", session_id);
        dto::decode_one(self.transport.get(&path, &[]).await?)
    }

    pub async fn check_session(&self, room: &str) -> Result<SessionValidity, AppError> {
        let path = format!("/session/valid/{}", super::path_segment(room)?);
        dto::decode_one(self.transport.get(&path, &[]).await?)
    }

    // dashboards

    pub async fn admin_overview(&self) -> Result<AdminOverview, AppError> {
        dto::decode_one(self.transport.get("/admin/overview", &[]).await?)
    }

    pub async fn admin_todays_classes(&self) -> Result<Vec<ClassSession>, AppError> {
        dto::decode_list(self.transport.get("/admin/todays-classes", &[]).await?)
    }

    pub async fn instructor_overview(&self) -> Result<InstructorOverview, AppError> {
        dto::decode_one(self.transport.get("/instructor/overview", &[]).await?)
    }

    pub async fn instructor_classes(&self, filter: ClassFilter) -> Result<Vec<ClassSession>, AppError> {
        let query = [("filter", filter.as_str())];
        dto::decode_list(self.transport.get("/instructor/classes", &query).await?)
    }

    pub async fn student_overview(&self) -> Result<StudentOverview, AppError> {
        dto::decode_one(self.transport.get("/student/overview", &[]).await?)
    }

    pub async fn student_classes(&self, filter: ClassFilter) -> Result<Vec<ClassSession>, AppError> {
        let query = [("filter", filter.as_str())];
        dto::decode_list(self.transport.get("/student/classes", &query).await?)
    }

    pub async fn student_course_progress(&self) -> Result<Vec<CourseProgress>, AppError> {
        dto::decode_list(self.transport.get("/student/course-progress", &[]).await?)
    }

    pub async fn student_assignments(&self) -> Result<Vec<Assignment>, AppError> {
        dto::decode_list(self.transport.get("/student/assignments", &[]).await?)
    }

    pub async fn student_recent_activities(&self) -> Result<Vec<Activity>, AppError> {
        dto::decode_list(self.transport.get("/student/recent-activities", &[]).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{Method, MockTransport};
    use serde_json::json;

    #[tokio::test]
    async fn filters_are_sent_as_query() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Get, "/student/classes", json!([]));
        let api = LmsApi::new(mock.clone());

        api.student_classes(ClassFilter::Upcoming).await.unwrap();

        let requests = mock.requests_to(Method::Get, "/student/classes");
        assert_eq!(
            requests[0].query,
            vec![("filter".to_string(), "upcoming".to_string())]
        );
    }

    #[tokio::test]
    async fn status_update_body() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Put, "/class-sessions/12/status", json!({}));
        let api = LmsApi::new(mock.clone());

        api.set_session_status(12, ClassStatus::Completed).await.unwrap();

        let requests = mock.requests_to(Method::Put, "/class-sessions/12/status");
        assert_eq!(requests[0].body, Some(json!({"class_status": "completed"})));
    }

    #[tokio::test]
    async fn room_stays_inside_its_segment() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::Get, "/session/valid/..%2Fx", json!({"valid": false}));
        mock.on(Method::Get, "/session/valid/a%3Fb", json!({"valid": false}));
        let api = LmsApi::new(mock.clone());

        assert!(!api.check_session("../x").await.unwrap().valid);
        assert!(!api.check_session("a?b").await.unwrap().valid);

        let paths: Vec<String> = mock.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/session/valid/..%2Fx", "/session/valid/a%3Fb"]);
        assert!(mock.requests().iter().all(|r| r.query.is_empty()));
    }

    #[tokio::test]
    async fn dot_room_is_refused_before_sending() {
        let mock = Arc::new(MockTransport::new());
        let api = LmsApi::new(mock.clone());

        assert!(api.check_session("..").await.is_err());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn login_reads_bare_body() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            Method::Post,
            "/login",
            json!({"token": "t-1", "user": {"id": 1, "name": "Ada", "email": "a@x.io", "role": "admin"}}),
        );
        let api = LmsApi::new(mock.clone());

        let res = api
            .login(&LoginRequest {
                email: "a@x.io".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(res.token, "t-1");
        assert_eq!(
            mock.requests()[0].body,
            Some(json!({"email": "a@x.io", "password": "pw"}))
        );
    }
}

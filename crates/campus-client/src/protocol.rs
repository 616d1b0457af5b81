//! The backend's HTTP contract: one entry per endpoint the client calls.
//! Bodies are the `campus_core` record types serialized as camelCase JSON.

use reqwest::Method;

/// A backend endpoint, relative to the configured base URL (which already
/// carries the `/api` prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    // ── Courses ─────────────────────────────────────────────────
    ListCourses,
    GetCourse(&'a str),
    SearchCourses,
    CreateCourse,
    UpdateCourse(&'a str),
    DeleteCourse(&'a str),

    // ── Students ────────────────────────────────────────────────
    ListStudents,
    CreateStudent,
    DeleteStudent(&'a str),

    // ── Performance ─────────────────────────────────────────────
    RunBenchmark,
    BenchmarkStatus,
}

impl Endpoint<'_> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::ListCourses
            | Endpoint::GetCourse(_)
            | Endpoint::SearchCourses
            | Endpoint::ListStudents
            | Endpoint::BenchmarkStatus => Method::GET,
            Endpoint::CreateCourse | Endpoint::CreateStudent | Endpoint::RunBenchmark => {
                Method::POST
            }
            Endpoint::UpdateCourse(_) => Method::PUT,
            Endpoint::DeleteCourse(_) | Endpoint::DeleteStudent(_) => Method::DELETE,
        }
    }

    /// Path below the base URL. Ids are percent-encoded as a single segment.
    pub fn path(&self) -> String {
        match self {
            Endpoint::ListCourses | Endpoint::CreateCourse => "/courses".to_string(),
            Endpoint::GetCourse(id) | Endpoint::UpdateCourse(id) | Endpoint::DeleteCourse(id) => {
                format!("/courses/{}", urlencoding::encode(id))
            }
            Endpoint::SearchCourses => "/courses/search".to_string(),
            Endpoint::ListStudents | Endpoint::CreateStudent => "/students".to_string(),
            Endpoint::DeleteStudent(id) => format!("/students/{}", urlencoding::encode(id)),
            Endpoint::RunBenchmark => "/performance/run".to_string(),
            Endpoint::BenchmarkStatus => "/performance/status".to_string(),
        }
    }

    /// Full URL for this endpoint under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_endpoints_follow_the_contract() {
        assert_eq!(Endpoint::ListCourses.method(), Method::GET);
        assert_eq!(Endpoint::ListCourses.path(), "/courses");
        assert_eq!(Endpoint::GetCourse("7").path(), "/courses/7");
        assert_eq!(Endpoint::CreateCourse.method(), Method::POST);
        assert_eq!(Endpoint::UpdateCourse("7").method(), Method::PUT);
        assert_eq!(Endpoint::UpdateCourse("7").path(), "/courses/7");
        assert_eq!(Endpoint::DeleteCourse("7").method(), Method::DELETE);
    }

    #[test]
    fn student_and_performance_endpoints() {
        assert_eq!(Endpoint::ListStudents.path(), "/students");
        assert_eq!(Endpoint::CreateStudent.method(), Method::POST);
        assert_eq!(Endpoint::DeleteStudent("42").path(), "/students/42");
        assert_eq!(Endpoint::RunBenchmark.method(), Method::POST);
        assert_eq!(Endpoint::RunBenchmark.path(), "/performance/run");
        assert_eq!(Endpoint::BenchmarkStatus.method(), Method::GET);
    }

    #[test]
    fn url_joins_base_without_double_slash() {
        assert_eq!(
            Endpoint::ListCourses.url("http://localhost:8080/api/"),
            "http://localhost:8080/api/courses"
        );
        assert_eq!(
            Endpoint::RunBenchmark.url("http://localhost:8080/api"),
            "http://localhost:8080/api/performance/run"
        );
    }

    #[test]
    fn ids_cannot_escape_their_segment() {
        assert_eq!(Endpoint::GetCourse("a/b c").path(), "/courses/a%2Fb%20c");
        assert_eq!(Endpoint::DeleteStudent("65f1e0c2").path(), "/students/65f1e0c2");
        assert_eq!(Endpoint::UpdateCourse("x?y#z").path(), "/courses/x%3Fy%23z");
    }
}

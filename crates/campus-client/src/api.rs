//! The contract every screen uses to reach the backend.

use std::future::Future;

use campus_core::{BenchmarkMeasurement, Course, Result, Student};

/// One operation per backend capability.
///
/// Implementations hold no state between calls: each operation issues exactly
/// one request and hands back either the decoded value or
/// [`campus_core::CampusError::RequestFailed`]. Nothing is retried or cached.
pub trait CampusApi: Send + Sync + 'static {
    fn list_courses(&self) -> impl Future<Output = Result<Vec<Course>>> + Send;

    fn get_course(&self, id: &str) -> impl Future<Output = Result<Course>> + Send;

    /// Case-insensitive substring search on the course name.
    fn search_courses(&self, name: &str) -> impl Future<Output = Result<Vec<Course>>> + Send;

    /// Store a draft. The returned course carries the server-assigned id.
    fn create_course(&self, draft: &Course) -> impl Future<Output = Result<Course>> + Send;

    /// Replace the whole stored record for `id`.
    fn update_course(
        &self,
        id: &str,
        course: &Course,
    ) -> impl Future<Output = Result<Course>> + Send;

    fn delete_course(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    fn list_students(&self) -> impl Future<Output = Result<Vec<Student>>> + Send;

    fn create_student(&self, draft: &Student) -> impl Future<Output = Result<Student>> + Send;

    fn delete_student(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Trigger a full server-side benchmark run and wait for all its results.
    fn run_benchmark(&self) -> impl Future<Output = Result<Vec<BenchmarkMeasurement>>> + Send;

    /// Readiness message of the benchmark service.
    fn benchmark_status(&self) -> impl Future<Output = Result<String>> + Send;
}

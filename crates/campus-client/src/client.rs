//! HTTP client for the course platform API.

use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

use campus_core::config::ApiConfig;
use campus_core::{BenchmarkMeasurement, CampusError, Course, Result, Student};

use crate::api::CampusApi;
use crate::protocol::Endpoint;

/// reqwest-backed [`CampusApi`]. Build one per process and share it by `Arc`.
pub struct ResourceClient {
    client: Client,
    base_url: String,
}

impl ResourceClient {
    /// Create a client for `base_url`. Without a timeout the transport default applies.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CampusError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            config.request_timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, endpoint: Endpoint<'_>) -> RequestBuilder {
        self.client
            .request(endpoint.method(), endpoint.url(&self.base_url))
    }
}

fn request_failed(e: reqwest::Error) -> CampusError {
    CampusError::RequestFailed(e.to_string())
}

impl CampusApi for ResourceClient {
    #[instrument(skip(self))]
    async fn list_courses(&self) -> Result<Vec<Course>> {
        let resp = self
            .request(Endpoint::ListCourses)
            .send()
            .await
            .map_err(request_failed)?;
        let courses: Vec<Course> = resp
            .error_for_status()
            .map_err(request_failed)?
            .json()
            .await
            .map_err(request_failed)?;
        debug!("Fetched {} courses", courses.len());
        Ok(courses)
    }

    #[instrument(skip(self))]
    async fn get_course(&self, id: &str) -> Result<Course> {
        let resp = self
            .request(Endpoint::GetCourse(id))
            .send()
            .await
            .map_err(request_failed)?;
        let course: Course = resp
            .error_for_status()
            .map_err(request_failed)?
            .json()
            .await
            .map_err(request_failed)?;
        Ok(course)
    }

    #[instrument(skip(self))]
    async fn search_courses(&self, name: &str) -> Result<Vec<Course>> {
        let resp = self
            .request(Endpoint::SearchCourses)
            .query(&[("name", name)])
            .send()
            .await
            .map_err(request_failed)?;
        let courses: Vec<Course> = resp
            .error_for_status()
            .map_err(request_failed)?
            .json()
            .await
            .map_err(request_failed)?;
        debug!("Search matched {} courses", courses.len());
        Ok(courses)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create_course(&self, draft: &Course) -> Result<Course> {
        let resp = self
            .request(Endpoint::CreateCourse)
            .json(draft)
            .send()
            .await
            .map_err(request_failed)?;
        let created: Course = resp
            .error_for_status()
            .map_err(request_failed)?
            .json()
            .await
            .map_err(request_failed)?;
        debug!("Created course {:?}", created.id);
        Ok(created)
    }

    #[instrument(skip(self, course))]
    async fn update_course(&self, id: &str, course: &Course) -> Result<Course> {
        let resp = self
            .request(Endpoint::UpdateCourse(id))
            .json(course)
            .send()
            .await
            .map_err(request_failed)?;
        let updated: Course = resp
            .error_for_status()
            .map_err(request_failed)?
            .json()
            .await
            .map_err(request_failed)?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, id: &str) -> Result<()> {
        let resp = self
            .request(Endpoint::DeleteCourse(id))
            .send()
            .await
            .map_err(request_failed)?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!("Course already gone");
            return Ok(());
        }
        resp.error_for_status().map_err(request_failed)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_students(&self) -> Result<Vec<Student>> {
        let resp = self
            .request(Endpoint::ListStudents)
            .send()
            .await
            .map_err(request_failed)?;
        let students: Vec<Student> = resp
            .error_for_status()
            .map_err(request_failed)?
            .json()
            .await
            .map_err(request_failed)?;
        debug!("Fetched {} students", students.len());
        Ok(students)
    }

    #[instrument(skip(self, draft), fields(email = %draft.email))]
    async fn create_student(&self, draft: &Student) -> Result<Student> {
        let resp = self
            .request(Endpoint::CreateStudent)
            .json(draft)
            .send()
            .await
            .map_err(request_failed)?;
        let created: Student = resp
            .error_for_status()
            .map_err(request_failed)?
            .json()
            .await
            .map_err(request_failed)?;
        debug!("Created student {:?}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn delete_student(&self, id: &str) -> Result<()> {
        let resp = self
            .request(Endpoint::DeleteStudent(id))
            .send()
            .await
            .map_err(request_failed)?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!("Student already gone");
            return Ok(());
        }
        resp.error_for_status().map_err(request_failed)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn run_benchmark(&self) -> Result<Vec<BenchmarkMeasurement>> {
        let resp = self
            .request(Endpoint::RunBenchmark)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(request_failed)?;
        let results: Vec<BenchmarkMeasurement> = resp
            .error_for_status()
            .map_err(request_failed)?
            .json()
            .await
            .map_err(request_failed)?;
        debug!("Benchmark returned {} measurements", results.len());
        Ok(results)
    }

    #[instrument(skip(self))]
    async fn benchmark_status(&self) -> Result<String> {
        let resp = self
            .request(Endpoint::BenchmarkStatus)
            .send()
            .await
            .map_err(request_failed)?;
        let status = resp
            .error_for_status()
            .map_err(request_failed)?
            .text()
            .await
            .map_err(request_failed)?;
        Ok(status)
    }
}

//! In-memory backend used by the controller and app tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use campus_client::CampusApi;
use campus_core::{BenchmarkMeasurement, CampusError, Course, Result, Student};
use chrono::NaiveDate;

pub(crate) fn course(id: &str, name: &str) -> Course {
    Course {
        id: Some(id.to_string()),
        name: name.to_string(),
        description: String::new(),
    }
}

pub(crate) fn student(id: &str, first: &str, last: &str) -> Student {
    Student {
        id: Some(id.to_string()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1),
        registration_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    }
}

pub(crate) fn measurement(operation: &str, database: &str, duration_ms: u64) -> BenchmarkMeasurement {
    BenchmarkMeasurement {
        operation: operation.to_string(),
        database: database.to_string(),
        record_count: 100,
        duration_ms,
        timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
        details: "Batch insert students".to_string(),
    }
}

/// What the fake backend keeps for a course: trimmed name, and a
/// placeholder when no description was given.
pub(crate) fn stored_course(id: String, sent: &Course) -> Course {
    let description = match sent.description.trim() {
        "" => "No description".to_string(),
        text => text.to_string(),
    };
    Course {
        id: Some(id),
        name: sent.name.trim().to_string(),
        description,
    }
}

/// What the fake backend keeps for a student: trimmed names and a
/// lowercased email.
pub(crate) fn stored_student(id: String, sent: &Student) -> Student {
    Student {
        id: Some(id),
        first_name: sent.first_name.trim().to_string(),
        last_name: sent.last_name.trim().to_string(),
        email: sent.email.trim().to_lowercase(),
        ..sent.clone()
    }
}

/// Behaves like the backend: assigns ids, rejects empty course names and
/// answers 404 for unknown course ids. Stored values are normalized (see
/// [`stored_course`] and [`stored_student`]), so what comes back differs
/// from what was sent. `fail_all` turns every call into a request failure.
#[derive(Default)]
pub(crate) struct FakeApi {
    courses: Mutex<Vec<Course>>,
    students: Mutex<Vec<Student>>,
    benchmark: Mutex<Vec<BenchmarkMeasurement>>,
    calls: Mutex<Vec<String>>,
    failing: AtomicBool,
    next_id: AtomicU64,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(100),
            ..Self::default()
        }
    }

    /// Ids handed out by create calls start at `first`.
    pub(crate) fn ids_from(self, first: u64) -> Self {
        self.next_id.store(first, Ordering::SeqCst);
        self
    }

    pub(crate) fn with_courses(courses: Vec<Course>) -> Self {
        let api = Self::new();
        *api.courses.lock().unwrap() = courses;
        api
    }

    pub(crate) fn with_students(students: Vec<Student>) -> Self {
        let api = Self::new();
        *api.students.lock().unwrap() = students;
        api
    }

    pub(crate) fn with_benchmark(results: Vec<BenchmarkMeasurement>) -> Self {
        let api = Self::new();
        *api.benchmark.lock().unwrap() = results;
        api
    }

    pub(crate) fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn stored_courses(&self) -> Vec<Course> {
        self.courses.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) -> Result<()> {
        self.calls.lock().unwrap().push(call.into());
        if self.failing.load(Ordering::SeqCst) {
            return Err(CampusError::RequestFailed("connection refused".into()));
        }
        Ok(())
    }

    fn assign_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

impl CampusApi for FakeApi {
    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.record("list_courses")?;
        Ok(self.courses.lock().unwrap().clone())
    }

    async fn get_course(&self, id: &str) -> Result<Course> {
        self.record(format!("get_course {id}"))?;
        self.courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| CampusError::RequestFailed("404 Not Found".into()))
    }

    async fn search_courses(&self, name: &str) -> Result<Vec<Course>> {
        self.record(format!("search_courses {name}"))?;
        let needle = name.to_lowercase();
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create_course(&self, draft: &Course) -> Result<Course> {
        self.record("create_course")?;
        let created = stored_course(self.assign_id(), draft);
        self.courses.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_course(&self, id: &str, course: &Course) -> Result<Course> {
        self.record(format!("update_course {id}"))?;
        if course.name.trim().is_empty() {
            return Err(CampusError::RequestFailed("400 Bad Request".into()));
        }
        let mut courses = self.courses.lock().unwrap();
        let stored = courses
            .iter_mut()
            .find(|c| c.id.as_deref() == Some(id))
            .ok_or_else(|| CampusError::RequestFailed("404 Not Found".into()))?;
        *stored = stored_course(id.to_string(), course);
        Ok(stored.clone())
    }

    async fn delete_course(&self, id: &str) -> Result<()> {
        self.record(format!("delete_course {id}"))?;
        self.courses
            .lock()
            .unwrap()
            .retain(|c| c.id.as_deref() != Some(id));
        Ok(())
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        self.record("list_students")?;
        Ok(self.students.lock().unwrap().clone())
    }

    async fn create_student(&self, draft: &Student) -> Result<Student> {
        self.record("create_student")?;
        let created = stored_student(self.assign_id(), draft);
        self.students.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_student(&self, id: &str) -> Result<()> {
        self.record(format!("delete_student {id}"))?;
        self.students
            .lock()
            .unwrap()
            .retain(|s| s.id.as_deref() != Some(id));
        Ok(())
    }

    async fn run_benchmark(&self) -> Result<Vec<BenchmarkMeasurement>> {
        self.record("run_benchmark")?;
        Ok(self.benchmark.lock().unwrap().clone())
    }

    async fn benchmark_status(&self) -> Result<String> {
        self.record("benchmark_status")?;
        Ok("Performance testing service is ready".to_string())
    }
}

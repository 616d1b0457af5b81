//! Backend calls requested by screens, and their translation into result actions.

use tracing::{error, info};

use campus_client::CampusApi;
use campus_core::{Course, Student};

use crate::action::Action;

/// A backend call a screen wants issued. The app runs it on a spawned task.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ListCourses,
    SearchCourses(String),
    GetCourse(String),
    CreateCourse(Course),
    UpdateCourse { id: String, course: Course },
    DeleteCourse(String),
    ListStudents,
    CreateStudent(Student),
    DeleteStudent(String),
    RunBenchmark,
    BenchmarkStatus,
}

/// Run one request against `api` and report the outcome as an action.
///
/// Failures are passed through as their message; nothing is retried.
pub async fn execute<A: CampusApi>(api: &A, request: Request) -> Action {
    match request {
        Request::ListCourses => match api.list_courses().await {
            Ok(courses) => Action::CoursesLoaded(courses),
            Err(e) => {
                error!("Error fetching courses: {}", e);
                Action::CoursesLoadFailed(e.to_string())
            }
        },
        Request::SearchCourses(name) => match api.search_courses(&name).await {
            Ok(courses) => Action::CoursesLoaded(courses),
            Err(e) => {
                error!("Error searching courses: {}", e);
                Action::CoursesLoadFailed(e.to_string())
            }
        },
        Request::GetCourse(id) => match api.get_course(&id).await {
            Ok(course) => Action::CourseLoaded(Box::new(course)),
            Err(e) => {
                error!("Error loading course {}: {}", id, e);
                Action::CourseLoadFailed(e.to_string())
            }
        },
        Request::CreateCourse(draft) => match api.create_course(&draft).await {
            Ok(course) => {
                info!("Course created: {:?}", course.id);
                Action::CourseCreated(Box::new(course))
            }
            Err(e) => {
                error!("Error creating course: {}", e);
                Action::CourseCreateFailed(e.to_string())
            }
        },
        Request::UpdateCourse { id, course } => match api.update_course(&id, &course).await {
            Ok(course) => Action::CourseUpdated(Box::new(course)),
            Err(e) => {
                error!("Error updating course {}: {}", id, e);
                Action::CourseUpdateFailed(e.to_string())
            }
        },
        Request::DeleteCourse(id) => match api.delete_course(&id).await {
            Ok(()) => Action::CourseDeleted(id),
            Err(e) => {
                error!("Error deleting course {}: {}", id, e);
                Action::CourseDeleteFailed {
                    id,
                    error: e.to_string(),
                }
            }
        },
        Request::ListStudents => match api.list_students().await {
            Ok(students) => Action::StudentsLoaded(students),
            Err(e) => {
                error!("Error fetching students: {}", e);
                Action::StudentsLoadFailed(e.to_string())
            }
        },
        Request::CreateStudent(draft) => match api.create_student(&draft).await {
            Ok(student) => {
                info!("Student created: {:?}", student.id);
                Action::StudentCreated(Box::new(student))
            }
            Err(e) => {
                error!("Error creating student: {}", e);
                Action::StudentCreateFailed(e.to_string())
            }
        },
        Request::DeleteStudent(id) => match api.delete_student(&id).await {
            Ok(()) => Action::StudentDeleted(id),
            Err(e) => {
                error!("Error deleting student {}: {}", id, e);
                Action::StudentDeleteFailed {
                    id,
                    error: e.to_string(),
                }
            }
        },
        Request::RunBenchmark => match api.run_benchmark().await {
            Ok(results) => {
                info!("Benchmark run finished with {} measurements", results.len());
                Action::BenchmarkCompleted(results)
            }
            Err(e) => {
                error!("Error running tests: {}", e);
                Action::BenchmarkFailed(e.to_string())
            }
        },
        Request::BenchmarkStatus => match api.benchmark_status().await {
            Ok(status) => Action::BenchmarkStatus(status),
            Err(e) => Action::BenchmarkStatusUnavailable(e.to_string()),
        },
    }
}

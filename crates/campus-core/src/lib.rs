pub mod benchmark;
pub mod config;
pub mod course;
pub mod error;
pub mod record;
pub mod student;

pub use benchmark::{flatten, group_by_operation, BenchmarkMeasurement, OperationGroup};
pub use config::CampusConfig;
pub use course::Course;
pub use error::{CampusError, Result};
pub use record::Record;
pub use student::Student;

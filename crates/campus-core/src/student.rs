use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// A student as stored by the backend.
///
/// There is no update operation for students; they are only listed,
/// created and deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    /// Unset on a fresh draft; sent as `null` if still unset on submit.
    pub date_of_birth: Option<NaiveDate>,

    pub registration_date: NaiveDate,
}

impl Student {
    /// An empty draft registered on `today`.
    pub fn draft(today: NaiveDate) -> Self {
        Self {
            id: None,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            date_of_birth: None,
            registration_date: today,
        }
    }

    /// An empty draft registered on the current local date.
    pub fn draft_today() -> Self {
        Self::draft(chrono::Local::now().date_naive())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for Student {
    const KIND: &'static str = "student";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> String {
        self.full_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn draft_defaults_registration_to_given_day() {
        let draft = Student::draft(date(2024, 6, 1));
        assert_eq!(draft.registration_date, date(2024, 6, 1));
        assert_eq!(draft.date_of_birth, None);
        assert!(draft.id.is_none());
        assert!(draft.first_name.is_empty());
    }

    #[test]
    fn wire_format_uses_camel_case_and_iso_dates() {
        let student = Student {
            id: None,
            first_name: "Ana".into(),
            last_name: "Lee".into(),
            email: "a@x.com".into(),
            date_of_birth: Some(date(2000, 1, 1)),
            registration_date: date(2024, 6, 1),
        };
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "firstName": "Ana",
                "lastName": "Lee",
                "email": "a@x.com",
                "dateOfBirth": "2000-01-01",
                "registrationDate": "2024-06-01",
            })
        );
    }

    #[test]
    fn label_is_full_name() {
        let mut student = Student::draft(date(2024, 6, 1));
        student.first_name = "Ana".into();
        student.last_name = "Lee".into();
        assert_eq!(student.label(), "Ana Lee");
    }
}

use serde::{Deserialize, Serialize};

use crate::record::{null_as_empty, Record};

/// A course as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Server-generated identifier. `None` until the course has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl Course {
    /// An empty draft for the create screen.
    pub fn draft() -> Self {
        Self::default()
    }
}

impl Record for Course {
    const KIND: &'static str = "course";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

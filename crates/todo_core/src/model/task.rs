use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Set by the collection-backed store; absent in the file-backed one.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Partial update applied by `TaskStore::update`; fields left `None` stay
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn text<T: Into<String>>(text: T) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskPatch};

    #[test]
    fn created_at_is_omitted_when_absent() {
        let task = Task {
            id: "a".to_string(),
            text: "demo".to_string(),
            completed: false,
            created_at: None,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "a", "text": "demo", "completed": false})
        );
    }

    #[test]
    fn created_at_round_trips_as_camel_case() {
        let json = r#"{"id":"a","text":"demo","completed":true,"createdAt":"2026-01-02T03:04:05Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert!(task.completed);
        assert_eq!(task.created_at.as_deref(), Some("2026-01-02T03:04:05Z"));
        assert_eq!(serde_json::to_string(&task).unwrap(), json);
    }

    #[test]
    fn patch_deserializes_missing_fields_as_none() {
        let patch: TaskPatch = serde_json::from_str(r#"{"completed":true}"#).unwrap();

        assert_eq!(patch.text, None);
        assert_eq!(patch.completed, Some(true));
        assert!(!patch.is_empty());
        assert!(TaskPatch::default().is_empty());
    }
}

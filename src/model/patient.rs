use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Patient {
    /// Sidebar / header label, e.g. `Jane (42)`.
    pub fn label(&self) -> String {
        match self.age {
            Some(age) => format!("{} ({age})", self.name),
            None => self.name.clone(),
        }
    }
}

/// Body of the upsert call. Without an `id` the backend creates a new patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PatientDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_omits_unset_fields() {
        let json = serde_json::to_value(PatientDraft::named("Jane")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Jane" }));
    }

    #[test]
    fn draft_with_all_fields() {
        let draft = PatientDraft {
            id: Some("p1".into()),
            name: "Jane".into(),
            age: Some(42),
            notes: Some("penicillin allergy".into()),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["age"], 42);
        assert_eq!(json["notes"], "penicillin allergy");
    }

    #[test]
    fn patient_without_optional_fields() {
        let patient: Patient = serde_json::from_str(r#"{"id":"p1","name":"Jane"}"#).unwrap();
        assert_eq!(patient.age, None);
        assert_eq!(patient.notes, None);
        assert_eq!(patient.label(), "Jane");
    }

    #[test]
    fn label_includes_age() {
        let patient = Patient {
            id: "p1".into(),
            name: "Jane".into(),
            age: Some(42),
            notes: None,
        };
        assert_eq!(patient.label(), "Jane (42)");
    }
}

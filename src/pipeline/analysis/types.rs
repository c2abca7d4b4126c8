use serde::{Deserialize, Serialize};

/// Closed category taxonomy for extracted schedule events.
///
/// This five-way taxonomy is authoritative for the extraction core; any
/// presentation-layer categories are a downstream concern. Unknown strings
/// from the model deserialize to `Other` rather than rejecting the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Exam,
    Assignment,
    Reading,
    Class,
    #[default]
    #[serde(other)]
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exam => "exam",
            Self::Assignment => "assignment",
            Self::Reading => "reading",
            Self::Class => "class",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dated event extracted from a document.
///
/// `id` is assigned by the orchestrator as a 1-based index over the final
/// list, stable only within one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default)]
    pub title: String,
    /// Calendar date in `YYYY-MM-DD` form, no time component.
    #[serde(default)]
    pub date: String,
    #[serde(rename = "type", default)]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_round_trips_lowercase() {
        let json = serde_json::to_string(&EventType::Exam).unwrap();
        assert_eq!(json, "\"exam\"");
        let back: EventType = serde_json::from_str("\"assignment\"").unwrap();
        assert_eq!(back, EventType::Assignment);
    }

    #[test]
    fn unknown_event_type_becomes_other() {
        let parsed: EventType = serde_json::from_str("\"fiesta\"").unwrap();
        assert_eq!(parsed, EventType::Other);
    }

    #[test]
    fn event_deserializes_with_missing_optionals() {
        let event: ScheduleEvent =
            serde_json::from_str(r#"{"title":"Quiz 1","date":"2024-09-10","type":"exam"}"#)
                .unwrap();
        assert_eq!(event.title, "Quiz 1");
        assert_eq!(event.date, "2024-09-10");
        assert_eq!(event.event_type, EventType::Exam);
        assert!(event.id.is_none());
        assert!(event.description.is_none());
    }

    #[test]
    fn event_serializes_type_field_name() {
        let event = ScheduleEvent {
            id: Some(1),
            title: "Final".into(),
            date: "2025-05-12".into(),
            event_type: EventType::Exam,
            description: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"exam\""));
        assert!(!json.contains("description"));
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One day of journaling.
///
/// A missing member decodes to its empty default. A member sent as `null`
/// decodes to `None` and is written back as `null`, so nothing the client
/// sent is lost on a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub date: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub today_done: Option<String>,
    pub tomorrow_plan: Option<Vec<String>>,
    pub insights: Option<String>,
    /// Opaque to the server, stored exactly as the client sent them.
    pub todos: Option<Vec<Value>>,
    pub focus_sessions: Option<Vec<FocusSession>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            date: Some(String::new()),
            keywords: Some(Vec::new()),
            today_done: Some(String::new()),
            tomorrow_plan: Some(Vec::new()),
            insights: Some(String::new()),
            todos: Some(Vec::new()),
            focus_sessions: Some(Vec::new()),
            extra: Map::new(),
        }
    }
}

impl Record {
    pub fn empty(date: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            ..Self::default()
        }
    }

    pub fn date(&self) -> &str {
        self.date.as_deref().unwrap_or_default()
    }

    pub fn keywords(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or_default()
    }

    pub fn today_done(&self) -> &str {
        self.today_done.as_deref().unwrap_or_default()
    }

    pub fn tomorrow_plan(&self) -> &[String] {
        self.tomorrow_plan.as_deref().unwrap_or_default()
    }

    pub fn insights(&self) -> &str {
        self.insights.as_deref().unwrap_or_default()
    }

    pub fn todos(&self) -> &[Value] {
        self.todos.as_deref().unwrap_or_default()
    }

    pub fn focus_sessions(&self) -> &[FocusSession] {
        self.focus_sessions.as_deref().unwrap_or_default()
    }
}

/// `duration` (minutes) and `task` keep whatever JSON the client sent,
/// `null` included; only the export reads them as a number and a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FocusSession {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub task: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FocusSession {
    pub fn task_label(&self) -> Option<&str> {
        self.task.as_ref().and_then(Value::as_str)
    }
}

// Only called for members that appear in the input, so `null` becomes `Some(Null)`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body the service attaches to a non-success response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(Value::String(detail.into())),
        }
    }

    /// The explanation to show verbatim, if the service sent a usable one.
    /// Structured validation details and empty strings count as absent.
    pub fn detail_text(&self) -> Option<&str> {
        match &self.detail {
            Some(Value::String(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_text_only_for_non_empty_strings() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Already signed up"}"#).unwrap();
        assert_eq!(body.detail_text(), Some("Already signed up"));

        let body: ErrorBody = serde_json::from_str(r#"{"detail":""}"#).unwrap();
        assert_eq!(body.detail_text(), None);

        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["query","email"],"msg":"field required"}]}"#)
                .unwrap();
        assert_eq!(body.detail_text(), None);

        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.detail_text(), None);
    }
}

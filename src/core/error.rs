use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationInvalidArgument,

    RewriteSourceNotFound,
    RewriteEncoding,
    RewriteInvalidPattern,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::RewriteSourceNotFound => "rewrite.source_not_found",
            ErrorCode::RewriteEncoding => "rewrite.encoding",
            ErrorCode::RewriteInvalidPattern => "rewrite.invalid_pattern",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathDetails {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidPatternDetails {
    pub rule: String,
    pub pattern: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    /// A rename mapping whose source file does not exist.
    pub fn rewrite_source_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::RewriteSourceNotFound,
            format!("{} not found", path),
            to_details(PathDetails { path, error: None }),
        )
    }

    /// File content matched the extension filter but is not valid UTF-8.
    pub fn rewrite_encoding(path: impl Into<String>, error: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::RewriteEncoding,
            format!("{} is not valid UTF-8 text", path),
            to_details(PathDetails {
                path,
                error: Some(error.into()),
            }),
        )
        .with_hint("Only UTF-8 encoded HTML and CSS files are rewritten")
    }

    pub fn rewrite_invalid_pattern(
        rule: impl Into<String>,
        pattern: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let rule = rule.into();
        Self::new(
            ErrorCode::RewriteInvalidPattern,
            format!("Rule '{}' has an invalid pattern", rule),
            to_details(InvalidPatternDetails {
                rule,
                pattern: pattern.into(),
                error: error.into(),
            }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }

    /// One-line description used in per-file outcomes and status lines.
    pub fn summary(&self) -> String {
        match self.details.get("error").and_then(Value::as_str) {
            Some(cause) if !cause.is_empty() => format!("{}: {}", self.message, cause),
            _ => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_namespaced() {
        assert_eq!(ErrorCode::RewriteEncoding.as_str(), "rewrite.encoding");
        assert_eq!(ErrorCode::InternalIoError.as_str(), "internal.io_error");
    }

    #[test]
    fn source_not_found_carries_path() {
        let err = Error::rewrite_source_not_found("css/webflow.css");
        assert_eq!(err.code, ErrorCode::RewriteSourceNotFound);
        assert_eq!(err.details["path"], "css/webflow.css");
        assert_eq!(err.to_string(), "css/webflow.css not found");
    }

    #[test]
    fn summary_includes_cause() {
        let err = Error::internal_io("permission denied", Some("write index.html".to_string()));
        assert_eq!(err.summary(), "IO error: permission denied");

        let err = Error::rewrite_source_not_found("js/webflow.js");
        assert_eq!(err.summary(), "js/webflow.js not found");
    }

    #[test]
    fn with_hint_appends() {
        let err = Error::internal_io("boom", None).with_hint("try again");
        assert_eq!(err.hints.len(), 1);
        assert_eq!(err.hints[0].message, "try again");
    }
}

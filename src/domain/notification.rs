/// A single structured validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub code: String,
    pub message: String,
}

/// Accumulator for validation errors, attached to every entity.
///
/// Errors collect in insertion order during one `validate()` pass. Entities
/// clear the notification at the start of each pass, so the error list always
/// reflects the latest validation only.
#[derive(Debug, Clone, Default)]
pub struct Notification {
    errors: Vec<ValidationIssue>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, code: &str, message: &str) {
        self.errors.push(ValidationIssue {
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// All accumulated errors as one `code: message` per line.
    pub fn messages(&self) -> String {
        self.errors
            .iter()
            .map(|issue| format!("{}: {}", issue.code, issue.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Patch parse errors

/// Raw patch text could not be turned into a patch.
///
/// Carries the parser's message so it can be shown inline next to the
/// input that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Patch parse error: {message}{}", position_suffix(.line, .column))]
pub struct PatchParseError {
    message: String,
    line: usize,
    column: usize,
}

impl PatchParseError {
    /// The parser's message, without position information.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 1-based line of the failure, 0 when not tied to a position.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the failure, 0 when not tied to a position.
    pub fn column(&self) -> usize {
        self.column
    }

    pub(crate) fn not_an_object(kind: &str) -> Self {
        Self {
            message: format!("patch must be a JSON object, got {}", kind),
            line: 0,
            column: 0,
        }
    }
}

impl From<serde_json::Error> for PatchParseError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json appends " at line X column Y" to Display; keep the bare message
        let full = err.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) if err.line() > 0 => full[..idx].to_string(),
            _ => full,
        };
        Self {
            message,
            line: err.line(),
            column: err.column(),
        }
    }
}

fn position_suffix(line: &usize, column: &usize) -> String {
    if *line > 0 {
        format!(" (line {}, column {})", line, column)
    } else {
        String::new()
    }
}

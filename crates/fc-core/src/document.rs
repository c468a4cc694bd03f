//! The raw server log, held in memory for the duration of one analysis.

/// Immutable log text.
///
/// Lines are addressed by their zero-based index. Both `\n` and `\r\n`
/// terminators are accepted, which matters for logs copied off Windows
/// dedicated servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDocument {
    text: String,
}

impl LogDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Builds a document from raw bytes, replacing invalid UTF-8.
    ///
    /// Player names in older logs are frequently Latin-1.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The first line, if the document is not empty.
    pub fn first_line(&self) -> Option<&str> {
        self.text.lines().next()
    }

    /// All lines paired with their index.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.text.lines().enumerate()
    }

    /// Lines strictly after `index`.
    pub fn lines_after(&self, index: usize) -> impl Iterator<Item = (usize, &str)> {
        self.lines().skip(index.saturating_add(1))
    }
}

impl From<String> for LogDocument {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for LogDocument {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// What a single source line means to the frame scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `\againframe`: redisplays an existing frame, never a definition.
    Reference,
    /// `\begin{frame}`
    Open,
    /// `\end{frame}`
    Close,
    /// `\frame{...}` on a single line.
    Shorthand,
    /// First non-whitespace character is `%`.
    Comment,
    Blank,
    Other,
}

pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Classify a line by its first non-whitespace token. A trailing `\r` is
/// left alone; it never affects the leading marker.
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim_start();
    if trimmed.starts_with("\\againframe") {
        LineKind::Reference
    } else if trimmed.starts_with("\\begin{frame}") {
        LineKind::Open
    } else if trimmed.starts_with("\\end{frame}") {
        LineKind::Close
    } else if trimmed.starts_with("\\frame{") {
        LineKind::Shorthand
    } else if trimmed.starts_with('%') {
        LineKind::Comment
    } else if trimmed.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Other
    }
}

pub fn is_comment(line: &str) -> bool {
    classify(line) == LineKind::Comment
}

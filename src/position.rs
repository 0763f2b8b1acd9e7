/// A 0-based line/column position in a text buffer.
///
/// The report layer adds 1 to both coordinates when rendering; everything
/// internal stays 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

impl Point {
    /// Locate a byte offset in `text`.
    ///
    /// Columns count characters, not bytes, so multibyte source yields
    /// the coordinates an editor would show. Offsets past the end clamp
    /// to the end of the text.
    pub fn of_byte(text: &str, byte: usize) -> Self {
        let prefix = &text[..byte.min(text.len())];
        let line = prefix.matches('\n').count();
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let column = prefix[line_start..].chars().count();
        Point { line, column }
    }
}

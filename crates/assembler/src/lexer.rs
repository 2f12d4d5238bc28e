//! Line scanner for LS-8 program text.

/// Extract the value text from one line of program source.
///
/// Everything from the first `#` to the end of the line is a comment.
/// Returns `None` for blank and comment-only lines.
pub(crate) fn value_text(line: &str) -> Option<&str> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    let value = line.trim();
    (!value.is_empty()).then_some(value)
}

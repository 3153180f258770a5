/// Returns `true` for the characters that start a comment.
pub(crate) fn is_comment_marker(c: char) -> bool {
    matches!(c, '#' | ';')
}

/// Strip the inline comment from a raw value and resolve escaped comment markers.
///
/// `\#` and `\;` become a literal `#` and `;`. Any other backslash is kept as written. An
/// unescaped marker ends the value; whitespace directly before it is dropped along with the
/// comment.
pub(crate) fn unescape_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            // Escaped marker: \# or \;
            if let Some(&marker) = chars.peek().filter(|&&next| is_comment_marker(next)) {
                _ = chars.next();
                result.push(marker);
            } else {
                result.push('\\');
            }
            continue;
        }

        if is_comment_marker(c) {
            let end = result.trim_end().len();
            result.truncate(end);
            break;
        }

        result.push(c);
    }

    result
}

use std::borrow::Cow;

use crate::is_list_space;

/// Join elements into a single list string.
pub fn to_list_string<S: AsRef<str>>(items: &[S]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&quote_element(item.as_ref()));
    }
    out
}

/// Quote one element so that it survives `parse_list` unchanged.
///
/// Braces are preferred; elements that cannot be braced (unbalanced braces,
/// backslashes, line breaks) are backslash-escaped instead.
pub fn quote_element(s: &str) -> Cow<'_, str> {
    if s.is_empty() {
        return Cow::Borrowed("{}");
    }
    if !s.starts_with('#') && !s.chars().any(is_special) {
        return Cow::Borrowed(s);
    }
    if can_brace(s) {
        return Cow::Owned(format!("{{{s}}}"));
    }
    Cow::Owned(escape(s))
}

fn is_special(c: char) -> bool {
    is_list_space(c) || matches!(c, '{' | '}' | '[' | ']' | '$' | ';' | '"' | '\\')
}

fn can_brace(s: &str) -> bool {
    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '\\' | '\n' | '\r' => return false,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for (i, c) in s.chars().enumerate() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            '\x0c' => out.push_str("\\f"),
            '#' if i == 0 => out.push_str("\\#"),
            c if is_special(c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

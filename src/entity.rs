use std::borrow::Cow;

use crate::output::Serialization;

fn escape<'a>(content: &'a str, replace: impl Fn(char) -> Option<&'static str>) -> Cow<'a, str> {
    // only allocate once something actually needs escaping
    let first = match content.char_indices().find(|(_, c)| replace(*c).is_some()) {
        Some((i, _)) => i,
        None => return content.into(),
    };
    let mut result = String::with_capacity(content.len() + 8);
    result.push_str(&content[..first]);
    for c in content[first..].chars() {
        match replace(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    result.into()
}

/// Escape text content.
pub(crate) fn serialize_text(content: &str, serialization: Serialization) -> Cow<str> {
    escape(content, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        // non-breaking space; there is no predefined entity for it in XML
        '\u{a0}' if serialization == Serialization::Sgml => Some("&nbsp;"),
        _ => None,
    })
}

/// Escape a double-quoted attribute value.
pub(crate) fn serialize_attribute(content: &str, serialization: Serialization) -> Cow<str> {
    escape(content, |c| match c {
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '<' if serialization == Serialization::Xml => Some("&lt;"),
        '\u{a0}' if serialization == Serialization::Sgml => Some("&nbsp;"),
        // normalized to a space by XML parsers otherwise
        '\n' if serialization == Serialization::Xml => Some("&#10;"),
        '\t' if serialization == Serialization::Xml => Some("&#9;"),
        _ => None,
    })
}

use std::borrow::Cow;

use crate::entity::{serialize_attribute, serialize_text};
use crate::output::Serialization;

/// Escapes text and attribute values for the active serialization.
///
/// A [`Document`](crate::Document) calls this once per text run and once per
/// attribute value. Replace it to change how characters are escaped, for
/// instance to write every non-ASCII character as a numeric reference.
pub trait Encoder {
    /// Escape text appearing as element content.
    fn text<'a>(&self, content: &'a str, serialization: Serialization) -> Cow<'a, str>;

    /// Escape a value appearing between double quotes in a start tag.
    fn attribute<'a>(&self, value: &'a str, serialization: Serialization) -> Cow<'a, str>;
}

/// The default encoder: escapes markup-significant characters only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupEncoder;

impl Encoder for MarkupEncoder {
    #[inline]
    fn text<'a>(&self, content: &'a str, serialization: Serialization) -> Cow<'a, str> {
        serialize_text(content, serialization)
    }

    #[inline]
    fn attribute<'a>(&self, value: &'a str, serialization: Serialization) -> Cow<'a, str> {
        serialize_attribute(value, serialization)
    }
}

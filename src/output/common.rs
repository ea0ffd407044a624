use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The syntax markup is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Serialization {
    /// SGML-style HTML: void elements are written as `<br>`.
    #[default]
    Sgml,
    /// XML-style XHTML: void elements are written as `<br/>`.
    Xml,
}

impl Serialization {
    /// The text that ends the start tag of a void element.
    pub fn self_close(self) -> &'static str {
        match self {
            Serialization::Sgml => ">",
            Serialization::Xml => "/>",
        }
    }
}

/// The document type being targeted.
///
/// Elements and attributes that only exist in some document types are
/// rejected in the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Doctype {
    /// HTML 5.
    #[default]
    Html5,
    /// HTML 4.01 Strict, or XHTML 1.0 Strict.
    Strict,
    /// HTML 4.01 Transitional, or XHTML 1.0 Transitional.
    Transitional,
    /// HTML 4.01 Frameset, or XHTML 1.0 Frameset.
    Frameset,
    /// No doctype. Nothing is declared and nothing is gated.
    None,
}

impl Doctype {
    /// Whether this is one of the HTML 4.01 / XHTML 1.0 doctypes.
    pub fn is_html4(self) -> bool {
        matches!(
            self,
            Doctype::Strict | Doctype::Transitional | Doctype::Frameset
        )
    }

    /// The `<!DOCTYPE ...>` declaration for this doctype, if any.
    pub fn declaration(self, serialization: Serialization) -> Option<&'static str> {
        use Serialization::*;
        let declaration = match (self, serialization) {
            (Doctype::Html5, _) => "<!DOCTYPE html>",
            (Doctype::Strict, Sgml) => {
                r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#
            }
            (Doctype::Strict, Xml) => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#
            }
            (Doctype::Transitional, Sgml) => {
                r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#
            }
            (Doctype::Transitional, Xml) => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#
            }
            (Doctype::Frameset, Sgml) => {
                r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Frameset//EN" "http://www.w3.org/TR/html4/frameset.dtd">"#
            }
            (Doctype::Frameset, Xml) => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Frameset//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-frameset.dtd">"#
            }
            (Doctype::None, _) => return None,
        };
        Some(declaration)
    }
}

impl fmt::Display for Doctype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Doctype::Html5 => "HTML 5",
            Doctype::Strict => "HTML 4.01 Strict",
            Doctype::Transitional => "HTML 4.01 Transitional",
            Doctype::Frameset => "HTML 4.01 Frameset",
            Doctype::None => "no doctype",
        })
    }
}

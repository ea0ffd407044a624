//! Attribute vocabulary.
//!
//! Attributes that only make sense on certain elements are listed here
//! together with the elements that accept them and the doctypes that know
//! them. Enumerated attributes get a Rust enum each; they parse from strings
//! with [`FromStr`], failing with [`Error::InvalidAttributeValue`].
//!
//! `autocomplete` is one type shared by `form`, `input`, `select` and
//! `textarea`. A `form` only accepts [`Autocomplete::On`] and
//! [`Autocomplete::Off`]; that is checked when the attribute is set.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::output::Tag as T;
use crate::output::{Serialization, Support, Tag};

/// An attribute restricted to particular elements or doctypes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AttributeDef {
    pub(crate) name: &'static str,
    /// `None` for global attributes.
    pub(crate) elements: Option<&'static [Tag]>,
    pub(crate) support: Support,
}

impl AttributeDef {
    const fn global(name: &'static str, support: Support) -> Self {
        AttributeDef {
            name,
            elements: None,
            support,
        }
    }

    const fn on(name: &'static str, elements: &'static [Tag]) -> Self {
        AttributeDef {
            name,
            elements: Some(elements),
            support: Support::All,
        }
    }

    const fn html5(mut self) -> Self {
        self.support = Support::Html5Only;
        self
    }

    const fn not_strict(mut self) -> Self {
        self.support = Support::NotStrict;
        self
    }

    pub(crate) fn applies_to(&self, tag: Tag) -> bool {
        self.elements.map_or(true, |elements| elements.contains(&tag))
    }
}

const SIZED: &[Tag] = &[
    T::Canvas,
    T::Embed,
    T::Iframe,
    T::Img,
    T::Input,
    T::Object,
    T::Video,
];
const DISABLEABLE: &[Tag] = &[
    T::Button,
    T::Fieldset,
    T::Input,
    T::Optgroup,
    T::Option,
    T::Select,
    T::Textarea,
];

pub(crate) const HIDDEN: AttributeDef = AttributeDef::global("hidden", Support::Html5Only);
pub(crate) const DATA: AttributeDef = AttributeDef::global("data-*", Support::Html5Only);
pub(crate) const HREF: AttributeDef = AttributeDef::on("href", &[T::A, T::Area, T::Base, T::Link]);
pub(crate) const SRC: AttributeDef = AttributeDef::on(
    "src",
    &[
        T::Audio,
        T::Embed,
        T::Iframe,
        T::Img,
        T::Input,
        T::Script,
        T::Source,
        T::Track,
        T::Video,
    ],
);
pub(crate) const ALT: AttributeDef = AttributeDef::on("alt", &[T::Area, T::Img, T::Input]);
pub(crate) const NAME: AttributeDef = AttributeDef::on(
    "name",
    &[
        T::A,
        T::Button,
        T::Fieldset,
        T::Form,
        T::Iframe,
        T::Input,
        T::Map,
        T::Meta,
        T::Object,
        T::Output,
        T::Param,
        T::Select,
        T::Textarea,
    ],
);
pub(crate) const VALUE: AttributeDef = AttributeDef::on(
    "value",
    &[
        T::Button,
        T::Data,
        T::Input,
        T::Li,
        T::Meter,
        T::Option,
        T::Param,
        T::Progress,
    ],
);
pub(crate) const TYPE: AttributeDef = AttributeDef::on(
    "type",
    &[
        T::A,
        T::Button,
        T::Embed,
        T::Input,
        T::Link,
        T::Object,
        T::Ol,
        T::Script,
        T::Source,
        T::Style,
    ],
);
pub(crate) const REL: AttributeDef = AttributeDef::on("rel", &[T::A, T::Area, T::Link]);
pub(crate) const TARGET: AttributeDef =
    AttributeDef::on("target", &[T::A, T::Area, T::Base, T::Form]).not_strict();
pub(crate) const CHARSET: AttributeDef = AttributeDef::on("charset", &[T::Meta, T::Script]);
pub(crate) const CONTENT: AttributeDef = AttributeDef::on("content", &[T::Meta]);
pub(crate) const HTTP_EQUIV: AttributeDef = AttributeDef::on("http-equiv", &[T::Meta]);
pub(crate) const ACTION: AttributeDef = AttributeDef::on("action", &[T::Form]);
pub(crate) const METHOD: AttributeDef = AttributeDef::on("method", &[T::Form]);
pub(crate) const AUTOCOMPLETE: AttributeDef =
    AttributeDef::on("autocomplete", &[T::Form, T::Input, T::Select, T::Textarea]).html5();
pub(crate) const CHECKED: AttributeDef = AttributeDef::on("checked", &[T::Input]);
pub(crate) const SELECTED: AttributeDef = AttributeDef::on("selected", &[T::Option]);
pub(crate) const DISABLED: AttributeDef = AttributeDef::on("disabled", DISABLEABLE);
pub(crate) const REQUIRED: AttributeDef =
    AttributeDef::on("required", &[T::Input, T::Select, T::Textarea]).html5();
pub(crate) const READONLY: AttributeDef = AttributeDef::on("readonly", &[T::Input, T::Textarea]);
pub(crate) const MULTIPLE: AttributeDef = AttributeDef::on("multiple", &[T::Input, T::Select]);
pub(crate) const PLACEHOLDER: AttributeDef =
    AttributeDef::on("placeholder", &[T::Input, T::Textarea]).html5();
pub(crate) const WIDTH: AttributeDef = AttributeDef::on("width", SIZED);
pub(crate) const HEIGHT: AttributeDef = AttributeDef::on("height", SIZED);
pub(crate) const COLSPAN: AttributeDef = AttributeDef::on("colspan", &[T::Td, T::Th]);
pub(crate) const ROWSPAN: AttributeDef = AttributeDef::on("rowspan", &[T::Td, T::Th]);
pub(crate) const FOR: AttributeDef = AttributeDef::on("for", &[T::Label, T::Output]);
pub(crate) const DOWNLOAD: AttributeDef = AttributeDef::on("download", &[T::A, T::Area]).html5();
pub(crate) const ROWS: AttributeDef = AttributeDef::on("rows", &[T::Textarea]);
pub(crate) const COLS: AttributeDef = AttributeDef::on("cols", &[T::Textarea]);

macro_rules! enumerated {
    (@support) => {
        Support::All
    };
    (@support $support:ident) => {
        Support::$support
    };
    (
        $(#[$meta:meta])*
        $name:ident, $attribute:literal {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal $(if $support:ident)?,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)*
        }

        impl $name {
            /// The keyword as written in markup.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)*
                }
            }

            pub(crate) fn support(self) -> Support {
                match self {
                    $($name::$variant => enumerated!(@support $($support)?),)*
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Error> {
                match s.to_ascii_lowercase().as_str() {
                    $($value => Ok($name::$variant),)*
                    _ => Err(Error::InvalidAttributeValue {
                        attribute: $attribute.to_string(),
                        value: s.to_string(),
                        reason: concat!("not a ", $attribute, " keyword"),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

enumerated! {
    /// Text direction.
    Dir, "dir" {
        /// Left to right.
        Ltr => "ltr",
        /// Right to left.
        Rtl => "rtl",
        /// Determined from the content. HTML 5 only.
        Auto => "auto" if Html5Only,
    }
}

enumerated! {
    /// Autofill hints for forms and form controls.
    Autocomplete, "autocomplete" {
        On => "on",
        Off => "off",
        Name => "name",
        Email => "email",
        Username => "username",
        NewPassword => "new-password",
        CurrentPassword => "current-password",
        OneTimeCode => "one-time-code",
        Organization => "organization",
        StreetAddress => "street-address",
        PostalCode => "postal-code",
        Country => "country",
        Tel => "tel",
        Url => "url",
    }
}

impl Autocomplete {
    /// Whether this is the plain on/off switch, the only form a `form` accepts.
    pub fn is_toggle(self) -> bool {
        matches!(self, Autocomplete::On | Autocomplete::Off)
    }
}

enumerated! {
    /// The type of an `input` element.
    InputType, "type" {
        Button => "button",
        Checkbox => "checkbox",
        Color => "color" if Html5Only,
        Date => "date" if Html5Only,
        DatetimeLocal => "datetime-local" if Html5Only,
        Email => "email" if Html5Only,
        File => "file",
        Hidden => "hidden",
        Image => "image",
        Month => "month" if Html5Only,
        Number => "number" if Html5Only,
        Password => "password",
        Radio => "radio",
        Range => "range" if Html5Only,
        Reset => "reset",
        Search => "search" if Html5Only,
        Submit => "submit",
        Tel => "tel" if Html5Only,
        Text => "text",
        Time => "time" if Html5Only,
        Url => "url" if Html5Only,
        Week => "week" if Html5Only,
    }
}

enumerated! {
    /// How a form is submitted.
    Method, "method" {
        Get => "get",
        Post => "post",
        /// Closes the enclosing dialog. HTML 5 only.
        Dialog => "dialog" if Html5Only,
    }
}

fn is_name_char(c: char) -> bool {
    !(c.is_ascii_whitespace()
        || c.is_control()
        || matches!(c, '"' | '\'' | '>' | '<' | '/' | '=' | '&'))
}

/// Check that an attribute name can be written into a start tag.
pub(crate) fn validate_name(name: &str, serialization: Serialization) -> Result<(), Error> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        None => false,
        Some(first) => {
            let start_ok = match serialization {
                Serialization::Sgml => is_name_char(first),
                Serialization::Xml => {
                    is_name_char(first) && !first.is_ascii_digit() && !matches!(first, '-' | '.')
                }
            };
            start_ok && chars.all(is_name_char)
        }
    };
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidAttributeName(name.to_string()))
    }
}

/// Check the part of a custom data attribute name after `data-`.
pub(crate) fn validate_data_name(name: &str) -> Result<(), Error> {
    let valid = !name.is_empty()
        && !name.chars().any(|c| c.is_ascii_uppercase() || c == ':')
        && name.chars().all(is_name_char)
        && !name.to_ascii_lowercase().starts_with("xml");
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidAttributeName(format!("data-{}", name)))
    }
}

/// Check an event name as used in `on<event>` handler attributes.
pub(crate) fn validate_event(event: &str) -> Result<(), Error> {
    if !event.is_empty() && event.chars().all(|c| c.is_ascii_lowercase()) {
        Ok(())
    } else {
        Err(Error::InvalidAttributeName(format!("on{}", event)))
    }
}

/// Check an `id`: it must be non-empty and contain no whitespace.
pub(crate) fn validate_id(id: &str) -> Result<(), Error> {
    if !id.is_empty() && !id.chars().any(|c| c.is_ascii_whitespace()) {
        Ok(())
    } else {
        Err(Error::InvalidAttributeValue {
            attribute: "id".to_string(),
            value: id.to_string(),
            reason: "must be non-empty and contain no whitespace",
        })
    }
}

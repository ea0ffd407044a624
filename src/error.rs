use std::io;

use thiserror::Error;

use crate::output::Doctype;

/// Errors raised while rendering a document.
///
/// None of these are recoverable by the library: a render that fails has
/// produced incomplete output, which the caller should discard.
#[derive(Debug, Error)]
pub enum Error {
    /// The child is not permitted by the content model of its parent.
    ///
    /// `parent` is `#document` at the top level, `child` is `#text` for text.
    #[error("<{child}> is not allowed inside <{parent}>")]
    IllegalNesting {
        /// The element (or `#document`) whose content was being written.
        parent: &'static str,
        /// The rejected element, or `#text`.
        child: &'static str,
    },
    /// An ancestor forbids this element anywhere among its descendants.
    #[error("<{child}> may not appear anywhere inside <{ancestor}>")]
    ForbiddenDescendant {
        /// The ancestor that introduced the restriction.
        ancestor: &'static str,
        /// The rejected element.
        child: &'static str,
    },
    /// The element does not exist in the target doctype.
    #[error("<{element}> is not supported in {doctype}")]
    UnsupportedElement {
        /// The rejected element.
        element: &'static str,
        /// The doctype of the document.
        doctype: Doctype,
    },
    /// The attribute (or this value of it) does not exist in the target doctype.
    #[error("attribute {attribute} on <{element}> is not supported in {doctype}")]
    UnsupportedAttribute {
        /// The attribute, with its value when only the value is unsupported.
        attribute: String,
        /// The element the attribute was set on.
        element: &'static str,
        /// The doctype of the document.
        doctype: Doctype,
    },
    /// The attribute is specific to other elements.
    #[error("attribute {attribute} is not allowed on <{element}>")]
    AttributeNotAllowed {
        /// The rejected attribute.
        attribute: &'static str,
        /// The element the attribute was set on.
        element: &'static str,
    },
    /// A value fails the structural constraints of its attribute.
    #[error("invalid value {value:?} for attribute {attribute}: {reason}")]
    InvalidAttributeValue {
        /// The attribute name.
        attribute: String,
        /// The rejected value.
        value: String,
        /// What the value violates.
        reason: &'static str,
    },
    /// The attribute name cannot be serialized.
    #[error("invalid attribute name {0:?}")]
    InvalidAttributeName(String),
    /// The same attribute was written twice on one start tag.
    #[error("duplicate attribute {attribute} on <{element}>")]
    DuplicateAttribute {
        /// The repeated attribute.
        attribute: String,
        /// The element being written.
        element: &'static str,
    },
    /// A start tag is still waiting for its attributes to be finished.
    #[error("cannot write {attempted} while the start tag <{open}> is unfinished")]
    TagInProgress {
        /// The element whose start tag is open.
        open: &'static str,
        /// What was attempted instead.
        attempted: &'static str,
    },
    /// Raw text would terminate its element early.
    #[error("raw text of <{element}> must not contain \"</{element}\"")]
    InvalidRawText {
        /// The raw text element.
        element: &'static str,
    },
    /// Content was given to a void element.
    #[error("<{0}> is a void element and cannot have content")]
    VoidElement(&'static str),
    /// Comment text cannot be serialized.
    #[error("comment text would not survive serialization: {0:?}")]
    InvalidComment(String),
    /// The output sink was detached before rendering finished.
    #[error("the output sink has been detached")]
    SinkDetached,
    /// The output sink failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

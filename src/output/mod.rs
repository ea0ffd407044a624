//! Output configuration and the tables that drive serialization.
//!
//! [`Parameters`] select the serialization style, the doctype and the
//! initial formatting flags of a [`Document`](crate::Document). The element
//! table in this module decides which elements may nest where.
mod common;
mod html5elements;
mod parameters;
pub(crate) mod pretty;

pub use common::{Doctype, Serialization};
pub(crate) use html5elements::with_tags;
pub use html5elements::{
    Categories, ContentModel, ElementDef, Exclusion, Layout, Support, Tag, TagSet,
};
pub use parameters::Parameters;
pub use pretty::INDENT;

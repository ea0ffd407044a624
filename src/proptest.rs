//! Proptest support
//!
//! Proptests allow you to test for *properties* of your code that must hold
//! for arbitrary data. The strategies here generate arbitrary fragments that
//! respect the content models, so rendering them must always succeed.
//!
//! This can be enabled by adding the `proptest` feature to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! fluent-html = { version = "0.1", features = ["proptest"] }
//! ```
//!
//! See the [`proptest`](https://docs.rs/proptest/latest/proptest/)
//! documentation for more information.

use proptest::prelude::*;

use crate::fixed::{Content, Element};
use crate::output::{Doctype, Parameters, Serialization, Tag};

// all of these exist in every doctype
const PHRASING_TAGS: &[Tag] = &[Tag::Em, Tag::Strong, Tag::Span, Tag::Code, Tag::B, Tag::I];
const FLOW_CONTAINERS: &[Tag] = &[Tag::Div, Tag::Blockquote, Tag::Fieldset];
const SERIALIZATIONS: &[Serialization] = &[Serialization::Sgml, Serialization::Xml];
const DOCTYPES: &[Doctype] = &[
    Doctype::Html5,
    Doctype::Strict,
    Doctype::Transitional,
    Doctype::Frameset,
    Doctype::None,
];
const TEXT: &str = "[a-z&<>\"' \u{a0}]{1,8}";

fn element(tag: Tag, children: Vec<Content>) -> Content {
    Content::Element(Element {
        tag,
        attributes: vec![],
        children,
    })
}

fn arb_attributes() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::option::of(TEXT).prop_map(|class| match class {
        Some(class) => vec![("class".to_string(), class)],
        None => vec![],
    })
}

fn arb_comment() -> impl Strategy<Value = String> {
    "[a-z ]{0,8}"
}

/// Generate arbitrary phrasing content: text and inline elements.
pub fn arb_phrasing_content() -> impl Strategy<Value = Content> {
    let leaf = prop_oneof![
        4 => TEXT.prop_map(Content::Text),
        1 => Just(element(Tag::Br, vec![])),
    ];

    leaf.prop_recursive(
        4,  // levels deep
        32, // maximum size of 32 nodes
        4,  // up to 4 items per collection
        |inner| {
            (
                prop::sample::select(PHRASING_TAGS),
                arb_attributes(),
                prop::collection::vec(inner, 0..4),
            )
                .prop_map(|(tag, attributes, children)| {
                    Content::Element(Element {
                        tag,
                        attributes,
                        children,
                    })
                })
        },
    )
}

/// Generate arbitrary flow content: blocks, lists and phrasing content.
pub fn arb_flow_content() -> impl Strategy<Value = Content> {
    let leaf = prop_oneof![
        arb_phrasing_content(),
        Just(element(Tag::Hr, vec![])),
        arb_comment().prop_map(Content::Comment),
        prop::collection::vec(arb_phrasing_content(), 0..4)
            .prop_map(|children| element(Tag::P, children)),
    ];

    leaf.prop_recursive(
        4,  // levels deep
        64, // maximum size of 64 nodes
        4,  // up to 4 items per collection
        |inner| {
            prop_oneof![
                (
                    prop::sample::select(FLOW_CONTAINERS),
                    prop::collection::vec(inner.clone(), 0..4)
                )
                    .prop_map(|(tag, children)| element(tag, children)),
                prop::collection::vec(inner, 0..4).prop_map(|items| {
                    element(
                        Tag::Ul,
                        items
                            .into_iter()
                            .map(|item| element(Tag::Li, vec![item]))
                            .collect(),
                    )
                }),
            ]
        },
    )
}

/// Generate an arbitrary `div` fragment containing flow content.
///
/// Example:
///
/// ```notrust
/// use fluent_html::proptest::{arb_fragment, arb_parameters};
///
/// proptest! {
///   #[test]
///   fn test_fragment_renders(fragment in arb_fragment(), parameters in arb_parameters()) {
///     prop_assert!(fragment.to_string(parameters).is_ok());
///   }
/// }
/// ```
pub fn arb_fragment() -> impl Strategy<Value = Element> {
    (arb_attributes(), prop::collection::vec(arb_flow_content(), 0..6)).prop_map(
        |(attributes, children)| Element {
            tag: Tag::Div,
            attributes,
            children,
        },
    )
}

/// Generate arbitrary output parameters.
pub fn arb_parameters() -> impl Strategy<Value = Parameters> {
    (
        prop::sample::select(SERIALIZATIONS),
        prop::sample::select(DOCTYPES),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(serialization, doctype, auto_newline, indent)| Parameters {
            serialization,
            doctype,
            auto_newline,
            indent,
        })
}

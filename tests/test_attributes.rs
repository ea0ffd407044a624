use insta::assert_snapshot;
use rstest::rstest;

use fluent_html::output::{Doctype, Parameters, Serialization};
use fluent_html::{Autocomplete, Content, Dir, Document, Error, InputType, Method};

fn render(
    parameters: Parameters,
    f: impl FnOnce(&mut Content<Vec<u8>>) -> Result<(), Error>,
) -> Result<String, Error> {
    let mut doc = Document::new(Vec::new(), parameters);
    f(&mut doc.content())?;
    Ok(String::from_utf8(doc.finish()?).unwrap())
}

fn with_doctype(doctype: Doctype) -> Parameters {
    Parameters {
        doctype,
        ..Default::default()
    }
}

#[test]
fn test_global_attributes() {
    let output = render(Parameters::default(), |c| {
        c.div()?
            .id("main")?
            .class("a b")?
            .style("color: red")?
            .lang("en")?
            .dir(Dir::Rtl)?
            .tabindex(-1)?
            .hidden(true)?
            .data("user-id", 42)?
            .on("click", "go()")?
            .close()
    })
    .unwrap();
    assert_snapshot!(output, @r#"<div id="main" class="a b" style="color: red" lang="en" dir="rtl" tabindex="-1" hidden data-user-id="42" onclick="go()"></div>"#);
}

#[rstest]
#[case(Serialization::Sgml, r#"<input type="checkbox" name="ok" checked disabled>"#)]
#[case(
    Serialization::Xml,
    r#"<input type="checkbox" name="ok" checked="checked" disabled="disabled"/>"#
)]
fn test_boolean_attributes(#[case] serialization: Serialization, #[case] expected: &str) {
    let parameters = Parameters {
        serialization,
        ..Default::default()
    };
    let output = render(parameters, |c| {
        c.input()?
            .input_type(InputType::Checkbox)?
            .name("ok")?
            .checked(true)?
            .disabled(true)?
            .readonly(false)?
            .close()
    })
    .unwrap();
    assert_eq!(output, expected);
}

#[test]
fn test_generic_attributes() {
    let output = render(Parameters::default(), |c| {
        c.span()?
            .attr("role", "note")?
            .attr_opt("aria-label", Some("label"))?
            .attr_opt("aria-hidden", None::<&str>)?
            .bool_attr("inert", true)?
            .bool_attr("translate", false)?
            .close()
    })
    .unwrap();
    assert_snapshot!(output, @r#"<span role="note" aria-label="label" inert></span>"#);
}

#[test]
fn test_element_specific_attributes() {
    let output = render(Parameters::default(), |c| {
        c.form()?
            .action("/search")?
            .method(Method::Post)?
            .autocomplete(Autocomplete::Off)?
            .body(|form| {
                form.label()?.for_("q")?.text("Search")?;
                form.input()?
                    .type_("search")?
                    .id("q")?
                    .placeholder("terms")?
                    .autocomplete(Autocomplete::Name)?
                    .required(true)?
                    .close()?;
                form.select()?.multiple(true)?.body(|select| {
                    select.option()?.value("a")?.selected(true)?.text("A")
                })?;
                form.textarea()?.rows(3)?.cols(40)?.close()
            })
    })
    .unwrap();
    assert_snapshot!(output, @r#"<form action="/search" method="post" autocomplete="off"><label for="q">Search</label><input type="search" id="q" placeholder="terms" autocomplete="name" required><select multiple><option value="a" selected>A</option></select><textarea rows="3" cols="40"></textarea></form>"#);
}

#[test]
fn test_links_and_media() {
    let output = render(Parameters::default(), |c| {
        c.p()?.body(|p| {
            p.a()?
                .href("/file.pdf")?
                .rel("nofollow")?
                .target("_blank")?
                .download("")?
                .text("get")?;
            p.img()?.src("a.png")?.alt("A")?.width(10)?.height(20)?.close()
        })
    })
    .unwrap();
    assert_snapshot!(output, @r#"<p><a href="/file.pdf" rel="nofollow" target="_blank" download="">get</a><img src="a.png" alt="A" width="10" height="20"></p>"#);
}

#[test]
fn test_table_spans() {
    let output = render(Parameters::default(), |c| {
        c.tr()?.body(|tr| {
            tr.td()?.colspan(2)?.text("wide")?;
            tr.th()?.rowspan(0)?.text("tall")
        })
    })
    .unwrap();
    assert_snapshot!(output, @r#"<tr><td colspan="2">wide</td><th rowspan="0">tall</th></tr>"#);
}

#[rstest]
#[case("colspan", "0")]
#[case("rows", "0")]
#[case("cols", "0")]
fn test_at_least_one(#[case] attribute: &str, #[case] value: &str) {
    let result = render(Parameters::default(), |c| match attribute {
        "colspan" => c.td()?.colspan(0)?.close(),
        "rows" => c.textarea()?.rows(0)?.close(),
        _ => c.textarea()?.cols(0)?.close(),
    });
    match result {
        Err(Error::InvalidAttributeValue {
            attribute: reported,
            value: reported_value,
            ..
        }) => {
            assert_eq!(reported, attribute);
            assert_eq!(reported_value, value);
        }
        other => panic!("{:?}", other),
    }
}

#[test]
fn test_attribute_not_allowed_on_element() {
    let err = render(Parameters::default(), |c| c.div()?.href("/")?.close()).unwrap_err();
    assert!(matches!(
        err,
        Error::AttributeNotAllowed {
            attribute: "href",
            element: "div"
        }
    ));
    let err = render(Parameters::default(), |c| {
        c.button()?.input_type(InputType::Submit)?.close()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        Error::AttributeNotAllowed {
            attribute: "type",
            element: "button"
        }
    ));
}

#[test]
fn test_type_on_other_elements_is_free_form() {
    let output = render(Parameters::default(), |c| {
        c.button()?.type_("submit")?.text("Go")?;
        c.script()?.type_("module")?.close()
    })
    .unwrap();
    assert_snapshot!(output, @r#"<button type="submit">Go</button><script type="module"></script>"#);
}

#[rstest]
#[case(Doctype::Strict, "target")]
#[case(Doctype::Transitional, "placeholder")]
#[case(Doctype::Strict, "hidden")]
#[case(Doctype::Strict, "data-*")]
#[case(Doctype::Strict, "dir=\"auto\"")]
#[case(Doctype::Transitional, "type=\"email\"")]
#[case(Doctype::Strict, "method=\"dialog\"")]
#[case(Doctype::Transitional, "charset")]
#[case(Doctype::Frameset, "autocomplete")]
fn test_unsupported_attribute(#[case] doctype: Doctype, #[case] attribute: &str) {
    let result = render(with_doctype(doctype), |c| match attribute {
        "target" => c.a()?.target("_top")?.close(),
        "placeholder" => c.input()?.placeholder("x")?.close(),
        "hidden" => c.div()?.hidden(true)?.close(),
        "data-*" => c.div()?.data("x", 1)?.close(),
        "dir=\"auto\"" => c.div()?.dir(Dir::Auto)?.close(),
        "type=\"email\"" => c.input()?.type_("email")?.close(),
        "method=\"dialog\"" => c.form()?.method(Method::Dialog)?.close(),
        "charset" => c.meta()?.charset("utf-8")?.close(),
        _ => c.form()?.autocomplete(Autocomplete::On)?.close(),
    });
    match result {
        Err(Error::UnsupportedAttribute {
            attribute: reported,
            doctype: reported_doctype,
            ..
        }) => {
            assert_eq!(reported, attribute);
            assert_eq!(reported_doctype, doctype);
        }
        other => panic!("{} in {}: {:?}", attribute, doctype, other),
    }
}

#[test]
fn test_supported_in_legacy_doctypes() {
    let output = render(with_doctype(Doctype::Transitional), |c| {
        c.a()?.target("_top")?.close()?;
        c.script()?.charset("utf-8")?.close()?;
        c.input()?.type_("text")?.close()
    })
    .unwrap();
    assert_snapshot!(output, @r#"<a target="_top"></a><script charset="utf-8"></script><input type="text">"#);
}

#[test]
fn test_form_autocomplete_only_toggles() {
    let err = render(Parameters::default(), |c| {
        c.form()?.autocomplete(Autocomplete::Email)?.close()
    })
    .unwrap_err();
    assert!(matches!(err, Error::InvalidAttributeValue { .. }));
    assert_eq!(
        err.to_string(),
        "invalid value \"email\" for attribute autocomplete: a form only accepts \"on\" or \"off\""
    );
}

#[test]
fn test_unknown_input_type() {
    let err = render(Parameters::default(), |c| c.input()?.type_("bogus")?.close()).unwrap_err();
    assert!(matches!(err, Error::InvalidAttributeValue { .. }));
    assert_eq!("DATETIME-LOCAL".parse::<InputType>().unwrap(), InputType::DatetimeLocal);
}

#[test]
fn test_duplicate_attribute() {
    let err = render(Parameters::default(), |c| {
        c.div()?.id("a")?.attr("ID", "b")?.close()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateAttribute {
            element: "div",
            ..
        }
    ));
}

#[test]
fn test_html_namespace_cannot_be_repeated() {
    let err = render(Parameters::xhtml(Doctype::Strict), |c| {
        c.html()?.attr("xmlns", "http://www.w3.org/1999/xhtml")?.close()
    })
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateAttribute { .. }));
}

#[rstest]
#[case(Serialization::Sgml, "a b", false)]
#[case(Serialization::Sgml, "a=b", false)]
#[case(Serialization::Sgml, "", false)]
#[case(Serialization::Sgml, "1st", true)]
#[case(Serialization::Xml, "1st", false)]
#[case(Serialization::Xml, "xml:lang", true)]
fn test_attribute_names(
    #[case] serialization: Serialization,
    #[case] name: &str,
    #[case] valid: bool,
) {
    let parameters = Parameters {
        serialization,
        ..Default::default()
    };
    let result = render(parameters, |c| c.span()?.attr(name, "x")?.close());
    if valid {
        assert!(result.is_ok(), "{:?}", name);
    } else {
        assert!(matches!(result, Err(Error::InvalidAttributeName(_))), "{:?}", name);
    }
}

#[test]
fn test_invalid_names_and_ids() {
    let err = render(Parameters::default(), |c| c.div()?.data("Bad", 1)?.close()).unwrap_err();
    assert!(matches!(err, Error::InvalidAttributeName(name) if name == "data-Bad"));
    let err =
        render(Parameters::default(), |c| c.div()?.on("Click", "x()")?.close()).unwrap_err();
    assert!(matches!(err, Error::InvalidAttributeName(name) if name == "onClick"));
    let err = render(Parameters::default(), |c| c.div()?.id("two words")?.close()).unwrap_err();
    assert!(matches!(err, Error::InvalidAttributeValue { .. }));
}

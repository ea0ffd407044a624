use fluent_html::output::{Doctype, Parameters, Serialization};
use fluent_html::{Content, Document, Error};

fn pretty(f: impl FnOnce(&mut Content<Vec<u8>>) -> Result<(), Error>) -> String {
    let mut doc = Document::new(Vec::new(), Parameters::pretty());
    f(&mut doc.content()).unwrap();
    String::from_utf8(doc.finish().unwrap()).unwrap()
}

#[test]
fn test_root_elements_do_not_indent() {
    let html = pretty(|c| {
        c.html()?.body(|html| {
            html.body()?
                .body(|body| body.div()?.body(|div| div.p()?.close()))
        })
    });
    assert_eq!(
        html,
        "<html>\n<body>\n<div>\n\t<p></p>\n</div>\n</body>\n</html>\n"
    );
}

#[test]
fn test_text_body_stays_on_one_line() {
    let html = pretty(|c| {
        c.div()?.body(|div| {
            div.h1()?.text("Title")?;
            div.p()?.text("Paragraph")
        })
    });
    assert_eq!(html, "<div>\n\t<h1>Title</h1>\n\t<p>Paragraph</p>\n</div>\n");
}

#[test]
fn test_empty_body_stays_on_one_line() {
    let html = pretty(|c| c.div()?.body(|div| div.div()?.close()));
    assert_eq!(html, "<div>\n\t<div></div>\n</div>\n");
}

#[test]
fn test_inline_at_line_start_is_indented() {
    let html = pretty(|c| c.div()?.body(|div| div.span()?.text("x")));
    assert_eq!(html, "<div>\n\t<span>x</span>\n</div>\n");
}

#[test]
fn test_mixed_content() {
    let html = pretty(|c| {
        c.p()?.body(|p| {
            p.text("Hello ")?;
            p.em()?.body(|em| em.strong()?.text("world"))?;
            p.text("!")?;
            Ok(())
        })
    });
    assert_eq!(html, "<p>\n\tHello <em><strong>world</strong></em>!\n</p>\n");
}

#[test]
fn test_inline_end_tag_after_block_child_is_indented() {
    let html = pretty(|c| c.div()?.body(|div| div.a()?.href("/")?.body(|a| a.div()?.close())));
    assert_eq!(
        html,
        "<div>\n\t<a href=\"/\">\n\t<div></div>\n\t</a>\n</div>\n"
    );
}

#[test]
fn test_line_break_ends_line() {
    let html = pretty(|c| {
        c.p()?.body(|p| {
            p.text("a")?;
            p.br()?.close()?;
            p.text("b")?;
            Ok(())
        })
    });
    assert_eq!(html, "<p>\n\ta<br>\n\tb\n</p>\n");
}

#[test]
fn test_void_block_element_ends_line() {
    let html = pretty(|c| {
        c.div()?.body(|div| {
            div.hr()?.close()?;
            div.hr()?.close()
        })
    });
    assert_eq!(html, "<div>\n\t<hr>\n\t<hr>\n</div>\n");
}

#[test]
fn test_verbatim_preserves_content() {
    let html = pretty(|c| {
        c.div()?.body(|div| {
            div.pre()?.body(|pre| {
                pre.text("line 1\n  ")?;
                pre.b()?.text("line 2")?;
                pre.text("\n")?;
                Ok(())
            })?;
            div.p()?.text("after")
        })
    });
    assert_eq!(
        html,
        "<div>\n\t<pre>line 1\n  <b>line 2</b>\n</pre>\n\t<p>after</p>\n</div>\n"
    );
}

#[test]
fn test_verbatim_round_trip() {
    let mut doc = Document::new(Vec::new(), Parameters::pretty());
    doc.content()
        .div()
        .unwrap()
        .body(|div| {
            assert_eq!(div.depth(), 1);
            div.pre()?.body(|pre| {
                assert_eq!(pre.depth(), 0);
                assert!(!pre.document().auto_newline_enabled());
                assert!(!pre.document().indent_enabled());
                pre.document().set_depth(7).set_indent(true);
                pre.text("x")?;
                Ok(())
            })?;
            assert_eq!(div.depth(), 1);
            assert!(div.document().auto_newline_enabled());
            assert!(div.document().indent_enabled());
            Ok(())
        })
        .unwrap();
    assert_eq!(doc.depth(), 0);
    let html = String::from_utf8(doc.finish().unwrap()).unwrap();
    assert_eq!(html, "<div>\n\t<pre>x</pre>\n</div>\n");
}

#[test]
fn test_raw_text_element_in_head() {
    let html = pretty(|c| {
        c.head()?.body(|head| {
            head.style()?.text("p > em { color: red }")?;
            head.script()?.text("if (a < b && c) {}")
        })
    });
    assert_eq!(
        html,
        concat!(
            "<head>\n",
            "<style>p > em { color: red }</style>\n",
            "<script>if (a < b && c) {}</script>\n",
            "</head>\n",
        )
    );
}

#[test]
fn test_textarea_is_verbatim_and_escaped() {
    let html = pretty(|c| {
        c.form()?.body(|form| {
            form.textarea()?
                .name("message")?
                .rows(2)?
                .text("<hello>\n  there")
        })
    });
    assert_eq!(
        html,
        "<form>\n\t<textarea name=\"message\" rows=\"2\">&lt;hello&gt;\n  there</textarea>\n</form>\n"
    );
}

#[test]
fn test_comment_is_indented() {
    let html = pretty(|c| {
        c.div()?.body(|div| {
            div.comment("note")?;
            div.nl()?;
            div.p()?.close()
        })
    });
    assert_eq!(html, "<div>\n\t<!--note-->\n\t<p></p>\n</div>\n");
}

#[test]
fn test_auto_newline_switched_off_inside_body() {
    let html = pretty(|c| {
        c.div()?.body(|div| {
            div.document().set_auto_newline(false);
            div.p()?.text("a")?;
            div.p()?.text("b")
        })
    });
    assert_eq!(html, "<div>\n<p>a</p><p>b</p>\n</div>\n");
}

#[test]
fn test_indent_without_tabs() {
    let parameters = Parameters {
        auto_newline: true,
        ..Default::default()
    };
    let mut doc = Document::new(Vec::new(), parameters);
    doc.content()
        .ul()
        .unwrap()
        .body(|ul| ul.li()?.text("x"))
        .unwrap();
    let html = String::from_utf8(doc.finish().unwrap()).unwrap();
    assert_eq!(html, "<ul>\n<li>x</li>\n</ul>\n");
}

#[test]
fn test_no_formatting_by_default() {
    let mut doc = Document::new(
        Vec::new(),
        Parameters {
            serialization: Serialization::Xml,
            doctype: Doctype::Transitional,
            ..Default::default()
        },
    );
    doc.content()
        .div()
        .unwrap()
        .body(|div| {
            div.p()?.text("a")?;
            div.hr()?.close()?;
            div.pre()?.text("b")
        })
        .unwrap();
    let html = String::from_utf8(doc.finish().unwrap()).unwrap();
    assert_eq!(html, "<div><p>a</p><hr/><pre>b</pre></div>");
}

#[test]
fn test_manual_formatting() {
    let mut doc = Document::new(
        Vec::new(),
        Parameters {
            indent: true,
            ..Default::default()
        },
    );
    doc.raw("<x>").unwrap();
    doc.inc_depth().nli(0).unwrap().raw("<y/>").unwrap();
    doc.dec_depth().nli(0).unwrap().raw("</x>").unwrap();
    doc.sp().unwrap();
    let html = String::from_utf8(doc.finish().unwrap()).unwrap();
    assert_eq!(html, "<x>\n\t<y/>\n</x> ");
}

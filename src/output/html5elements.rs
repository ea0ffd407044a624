//! The HTML element table.
//!
//! Every element carries a set of content [`Categories`] and a
//! [`ContentModel`] describing which children it accepts. A child is legal
//! when its categories intersect the categories the model requires, or when
//! the model names the child explicitly. Rules that cannot be expressed that
//! way (no interactive descendants, no nested forms, ...) are carried as an
//! [`Exclusion`] that applies to all descendants.

use std::fmt;
use std::ops::BitOr;

use super::Doctype;

// Variant, factory method name, element name.
macro_rules! with_tags {
    ($callback:ident) => {
        $callback! {
            Html html "html",
            Head head "head",
            Body body "body",
            Title title "title",
            Base base "base",
            Link link "link",
            Meta meta "meta",
            Style style "style",
            Script script "script",
            Noscript noscript "noscript",
            Template template "template",
            Article article "article",
            Aside aside "aside",
            Nav nav "nav",
            Section section "section",
            Header header "header",
            Footer footer "footer",
            Main main "main",
            Address address "address",
            H1 h1 "h1",
            H2 h2 "h2",
            H3 h3 "h3",
            H4 h4 "h4",
            H5 h5 "h5",
            H6 h6 "h6",
            Hgroup hgroup "hgroup",
            P p "p",
            Hr hr "hr",
            Pre pre "pre",
            Blockquote blockquote "blockquote",
            Ol ol "ol",
            Ul ul "ul",
            Menu menu "menu",
            Li li "li",
            Dl dl "dl",
            Dt dt "dt",
            Dd dd "dd",
            Figure figure "figure",
            Figcaption figcaption "figcaption",
            Div div "div",
            A a "a",
            Em em "em",
            Strong strong "strong",
            Small small "small",
            S s "s",
            Cite cite "cite",
            Q q "q",
            Dfn dfn "dfn",
            Abbr abbr "abbr",
            Ruby ruby "ruby",
            Rt rt "rt",
            Rp rp "rp",
            Data data "data",
            Time time "time",
            Code code "code",
            Var var "var",
            Samp samp "samp",
            Kbd kbd "kbd",
            Sub sub "sub",
            Sup sup "sup",
            I i "i",
            B b "b",
            U u "u",
            Mark mark "mark",
            Bdi bdi "bdi",
            Bdo bdo "bdo",
            Span span "span",
            Br br "br",
            Wbr wbr "wbr",
            Ins ins "ins",
            Del del "del",
            Picture picture "picture",
            Source source "source",
            Img img "img",
            Iframe iframe "iframe",
            Embed embed "embed",
            Object object "object",
            Param param "param",
            Video video "video",
            Audio audio "audio",
            Track track "track",
            Map map "map",
            Area area "area",
            Table table "table",
            Caption caption "caption",
            Colgroup colgroup "colgroup",
            Col col "col",
            Tbody tbody "tbody",
            Thead thead "thead",
            Tfoot tfoot "tfoot",
            Tr tr "tr",
            Td td "td",
            Th th "th",
            Form form "form",
            Label label "label",
            Input input "input",
            Button button "button",
            Select select "select",
            Datalist datalist "datalist",
            Optgroup optgroup "optgroup",
            Option option "option",
            Textarea textarea "textarea",
            Output output "output",
            Progress progress "progress",
            Meter meter "meter",
            Fieldset fieldset "fieldset",
            Legend legend "legend",
            Details details "details",
            Summary summary "summary",
            Dialog dialog "dialog",
            Canvas canvas "canvas",
            Acronym acronym "acronym",
            Big big "big",
            Tt tt "tt",
        }
    };
}
pub(crate) use with_tags;

macro_rules! define_tags {
    ($($variant:ident $method:ident $name:literal,)*) => {
        /// An HTML element type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Tag {
            $(
                #[doc = concat!("`<", $name, ">`")]
                $variant,
            )*
        }

        impl Tag {
            /// Every known element, in table order.
            pub const ALL: &'static [Tag] = &[$(Tag::$variant,)*];

            /// The element name as written in markup.
            pub fn name(self) -> &'static str {
                match self {
                    $(Tag::$variant => $name,)*
                }
            }

            /// Look up an element by name, ignoring ASCII case.
            pub fn from_name(name: &str) -> Option<Tag> {
                $(
                    if name.eq_ignore_ascii_case($name) {
                        return Some(Tag::$variant);
                    }
                )*
                None
            }
        }
    };
}

with_tags!(define_tags);

// TagSet is a u128 bitmap
const _: () = assert!(Tag::ALL.len() <= 128);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of content categories.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Categories(u16);

impl Categories {
    /// No categories at all.
    pub const NONE: Categories = Categories(0);
    /// Flow content.
    pub const FLOW: Categories = Categories(1);
    /// Phrasing content.
    pub const PHRASING: Categories = Categories(1 << 1);
    /// Palpable content.
    pub const PALPABLE: Categories = Categories(1 << 2);
    /// Metadata content.
    pub const METADATA: Categories = Categories(1 << 3);
    /// Embedded content.
    pub const EMBEDDED: Categories = Categories(1 << 4);
    /// Interactive content.
    pub const INTERACTIVE: Categories = Categories(1 << 5);
    /// Script-supporting elements.
    pub const SCRIPT_SUPPORTING: Categories = Categories(1 << 6);
    /// Sectioning content.
    pub const SECTIONING: Categories = Categories(1 << 7);
    /// Heading content.
    pub const HEADING: Categories = Categories(1 << 8);
    /// Plain text only.
    pub const TEXT: Categories = Categories(1 << 9);
    /// Everything.
    pub const ALL: Categories = Categories((1 << 10) - 1);

    /// The categories a run of text belongs to.
    pub const TEXT_RUN: Categories = Categories(1 | (1 << 1) | (1 << 9));

    const NAMES: [&'static str; 10] = [
        "flow",
        "phrasing",
        "palpable",
        "metadata",
        "embedded",
        "interactive",
        "script-supporting",
        "sectioning",
        "heading",
        "text",
    ];

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn intersects(self, other: Categories) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Categories {
    type Output = Categories;

    fn bitor(self, rhs: Categories) -> Categories {
        Categories(self.0 | rhs.0)
    }
}

impl fmt::Debug for Categories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = Self::NAMES
            .iter()
            .enumerate()
            .filter(|(i, _)| self.0 & (1 << i) != 0)
            .map(|(_, name)| *name);
        f.debug_set().entries(names).finish()
    }
}

/// A set of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TagSet(u128);

impl TagSet {
    pub const EMPTY: TagSet = TagSet(0);

    pub fn of(tags: &[Tag]) -> TagSet {
        tags.iter()
            .fold(TagSet::EMPTY, |set, tag| TagSet(set.0 | Self::bit(*tag)))
    }

    fn bit(tag: Tag) -> u128 {
        1 << (tag as u8)
    }

    pub fn contains(self, tag: Tag) -> bool {
        self.0 & Self::bit(tag) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: TagSet) -> TagSet {
        TagSet(self.0 | other.0)
    }
}

/// What an element accepts as children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentModel {
    /// Children in any of these categories are accepted.
    pub categories: Categories,
    /// These elements are accepted regardless of their categories.
    pub tags: TagSet,
    /// Accept whatever the parent accepts, in addition to `tags`.
    pub transparent: bool,
}

impl ContentModel {
    /// Accepts nothing.
    pub fn nothing() -> Self {
        ContentModel {
            categories: Categories::NONE,
            tags: TagSet::EMPTY,
            transparent: false,
        }
    }

    /// Accepts every element and text; used at the document level.
    pub fn any() -> Self {
        ContentModel {
            categories: Categories::ALL,
            tags: TagSet::of(Tag::ALL),
            transparent: false,
        }
    }

    /// Accepts children in any of `categories`.
    pub fn of(categories: Categories) -> Self {
        ContentModel {
            categories,
            ..Self::nothing()
        }
    }

    /// Accepts exactly `tags` (plus script-supporting elements, which may
    /// appear almost anywhere).
    pub fn only(tags: &[Tag]) -> Self {
        ContentModel {
            categories: Categories::SCRIPT_SUPPORTING,
            tags: TagSet::of(tags),
            transparent: false,
        }
    }

    /// Accepts whatever the parent accepts.
    pub fn transparent() -> Self {
        ContentModel {
            transparent: true,
            ..Self::nothing()
        }
    }

    /// Also accept `tags`.
    pub fn with(mut self, tags: &[Tag]) -> Self {
        self.tags = self.tags.union(TagSet::of(tags));
        self
    }

    pub fn allows(&self, tag: Tag, categories: Categories) -> bool {
        categories.intersects(self.categories) || self.tags.contains(tag)
    }

    pub fn allows_text(&self) -> bool {
        Categories::TEXT_RUN.intersects(self.categories)
    }

    /// The model in effect for children, given the parent's effective model.
    pub fn resolve(self, parent: &ContentModel) -> ContentModel {
        if !self.transparent {
            return self;
        }
        ContentModel {
            categories: parent.categories,
            tags: parent.tags.union(self.tags),
            transparent: false,
        }
    }
}

/// Elements an ancestor forbids among all of its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Exclusion {
    pub categories: Categories,
    pub tags: TagSet,
}

impl Exclusion {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.tags.is_empty()
    }

    pub fn forbids(&self, tag: Tag, categories: Categories) -> bool {
        categories.intersects(self.categories) || self.tags.contains(tag)
    }
}

/// How an element is laid out when automatic newlines are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Starts on its own line; a callback body is indented one level deeper.
    Block,
    /// Like `Block`, but the body stays at the same depth.
    Root,
    /// Stays on the current line.
    Inline,
    /// Stays on the current line and ends it.
    LineBreak,
    /// Starts on its own line; no formatting at all inside.
    Verbatim,
}

/// The doctypes an element or attribute exists in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    All,
    Html5Only,
    Html4Only,
    /// Everything except the strict HTML 4.01 / XHTML 1.0 doctype.
    NotStrict,
}

impl Support {
    pub fn allows(self, doctype: Doctype) -> bool {
        match (self, doctype) {
            (_, Doctype::None) => true,
            (Support::All, _) => true,
            (Support::Html5Only, doctype) => doctype == Doctype::Html5,
            (Support::Html4Only, doctype) => doctype.is_html4(),
            (Support::NotStrict, doctype) => doctype != Doctype::Strict,
        }
    }
}

/// Everything the table knows about one element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementDef {
    pub tag: Tag,
    pub categories: Categories,
    pub content: ContentModel,
    /// Void elements have no body and no end tag.
    pub void: bool,
    pub layout: Layout,
    pub support: Support,
    pub exclusion: Exclusion,
    /// Text is written unescaped in SGML serialization.
    pub raw_text: bool,
}

impl ElementDef {
    fn normal(tag: Tag, categories: Categories, content: ContentModel, layout: Layout) -> Self {
        ElementDef {
            tag,
            categories,
            content,
            void: false,
            layout,
            support: Support::All,
            exclusion: Exclusion::default(),
            raw_text: false,
        }
    }

    fn void(tag: Tag, categories: Categories, layout: Layout) -> Self {
        ElementDef {
            void: true,
            ..Self::normal(tag, categories, ContentModel::nothing(), layout)
        }
    }

    fn support(mut self, support: Support) -> Self {
        self.support = support;
        self
    }

    fn html5(self) -> Self {
        self.support(Support::Html5Only)
    }

    fn excluding(mut self, categories: Categories, tags: &[Tag]) -> Self {
        self.exclusion = Exclusion {
            categories,
            tags: TagSet::of(tags),
        };
        self
    }

    fn raw_text(mut self) -> Self {
        self.raw_text = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.tag.name()
    }
}

impl Tag {
    /// The table entry for this element.
    pub fn definition(self) -> ElementDef {
        use Categories as C;
        use Layout::*;
        use Tag::*;

        let flow = C::FLOW | C::PALPABLE;
        let phrasing = C::FLOW | C::PHRASING | C::PALPABLE;
        let interactive = phrasing | C::INTERACTIVE;
        let sectioning = flow | C::SECTIONING;
        let heading = flow | C::HEADING;
        let embedded = phrasing | C::EMBEDDED;
        let media = embedded | C::INTERACTIVE;
        let phrasing_model = ContentModel::of(C::PHRASING);
        let flow_model = ContentModel::of(C::FLOW);
        let text_model = ContentModel::of(C::TEXT);
        let no_headings = C::HEADING | C::SECTIONING;

        match self {
            Html => ElementDef::normal(
                self,
                C::NONE,
                ContentModel::nothing().with(&[Head, Body]),
                Root,
            ),
            Head => ElementDef::normal(self, C::NONE, ContentModel::of(C::METADATA), Root),
            Body => ElementDef::normal(self, C::NONE, flow_model, Root),
            Title => ElementDef::normal(self, C::METADATA, text_model, Block),
            Base | Link | Meta => ElementDef::void(self, C::METADATA, Block),
            Style => ElementDef::normal(self, C::METADATA, text_model, Verbatim).raw_text(),
            Script => ElementDef::normal(
                self,
                C::METADATA | C::FLOW | C::PHRASING | C::SCRIPT_SUPPORTING,
                text_model,
                Verbatim,
            )
            .raw_text(),
            Noscript => ElementDef::normal(
                self,
                C::METADATA | C::FLOW | C::PHRASING,
                ContentModel::transparent(),
                Block,
            ),
            Template => ElementDef::normal(
                self,
                C::METADATA | C::FLOW | C::PHRASING | C::SCRIPT_SUPPORTING,
                ContentModel::of(C::FLOW | C::METADATA),
                Block,
            )
            .html5(),
            Article | Aside | Nav | Section => {
                ElementDef::normal(self, sectioning, flow_model, Block).html5()
            }
            Header | Footer => ElementDef::normal(self, flow, flow_model, Block)
                .html5()
                .excluding(C::NONE, &[Header, Footer, Main]),
            Main => ElementDef::normal(self, flow, flow_model, Block).html5(),
            Address => ElementDef::normal(self, flow, flow_model, Block)
                .excluding(no_headings, &[Header, Footer, Address]),
            H1 | H2 | H3 | H4 | H5 | H6 => ElementDef::normal(self, heading, phrasing_model, Block),
            Hgroup => ElementDef::normal(
                self,
                heading,
                ContentModel::only(&[H1, H2, H3, H4, H5, H6, P]),
                Block,
            )
            .html5(),
            P => ElementDef::normal(self, flow, phrasing_model, Block),
            Hr => ElementDef::void(self, C::FLOW, Block),
            Pre => ElementDef::normal(self, flow, phrasing_model, Verbatim),
            Blockquote => ElementDef::normal(self, flow, flow_model, Block),
            Ol | Ul | Menu => ElementDef::normal(self, flow, ContentModel::only(&[Li]), Block),
            Li | Dd => ElementDef::normal(self, C::NONE, flow_model, Block),
            Dl => ElementDef::normal(self, flow, ContentModel::only(&[Dt, Dd, Div]), Block),
            Dt => ElementDef::normal(self, C::NONE, flow_model, Block)
                .excluding(no_headings, &[Header, Footer]),
            Figure => {
                ElementDef::normal(self, flow, flow_model.with(&[Figcaption]), Block).html5()
            }
            Figcaption => ElementDef::normal(self, C::NONE, flow_model, Block).html5(),
            Div => ElementDef::normal(self, flow, flow_model, Block),
            A => ElementDef::normal(self, interactive, ContentModel::transparent(), Inline)
                .excluding(C::INTERACTIVE, &[]),
            Em | Strong | Small | Cite | Q | Abbr | Code | Var | Samp | Kbd | Sub | Sup | I
            | B | Span | Bdo => ElementDef::normal(self, phrasing, phrasing_model, Inline),
            S | U => ElementDef::normal(self, phrasing, phrasing_model, Inline)
                .support(Support::NotStrict),
            Dfn => ElementDef::normal(self, phrasing, phrasing_model, Inline)
                .excluding(C::NONE, &[Dfn]),
            Ruby => ElementDef::normal(self, phrasing, phrasing_model.with(&[Rt, Rp]), Inline)
                .html5(),
            Rt => ElementDef::normal(self, C::NONE, phrasing_model, Inline).html5(),
            Rp => ElementDef::normal(self, C::NONE, text_model, Inline).html5(),
            Data | Time | Mark | Bdi | Output => {
                ElementDef::normal(self, phrasing, phrasing_model, Inline).html5()
            }
            Br => ElementDef::void(self, C::FLOW | C::PHRASING, LineBreak),
            Wbr => ElementDef::void(self, C::FLOW | C::PHRASING, Inline).html5(),
            Ins | Del => ElementDef::normal(self, phrasing, ContentModel::transparent(), Inline),
            Picture => ElementDef::normal(
                self,
                C::FLOW | C::PHRASING | C::EMBEDDED,
                ContentModel::only(&[Source, Img]),
                Inline,
            )
            .html5(),
            Source => ElementDef::void(self, C::NONE, Block).html5(),
            Img => ElementDef::void(self, embedded, Inline),
            Iframe => ElementDef::normal(self, media, ContentModel::nothing(), Inline)
                .support(Support::NotStrict),
            Embed => ElementDef::void(self, media, Inline).html5(),
            Object => ElementDef::normal(
                self,
                embedded,
                ContentModel::transparent().with(&[Param]),
                Inline,
            ),
            Param => ElementDef::void(self, C::NONE, Block),
            Video | Audio => ElementDef::normal(
                self,
                media,
                ContentModel::transparent().with(&[Source, Track]),
                Block,
            )
            .html5()
            .excluding(C::NONE, &[Video, Audio]),
            Track => ElementDef::void(self, C::NONE, Block).html5(),
            Map => ElementDef::normal(
                self,
                phrasing,
                ContentModel::transparent().with(&[Area]),
                Block,
            ),
            Area => ElementDef::void(self, C::FLOW | C::PHRASING, Block),
            Table => ElementDef::normal(
                self,
                flow,
                ContentModel::only(&[Caption, Colgroup, Thead, Tbody, Tfoot, Tr]),
                Block,
            ),
            Caption => {
                ElementDef::normal(self, C::NONE, flow_model, Block).excluding(C::NONE, &[Table])
            }
            Colgroup => ElementDef::normal(self, C::NONE, ContentModel::only(&[Col]), Block),
            Col => ElementDef::void(self, C::NONE, Block),
            Tbody | Thead | Tfoot => {
                ElementDef::normal(self, C::NONE, ContentModel::only(&[Tr]), Block)
            }
            Tr => ElementDef::normal(self, C::NONE, ContentModel::only(&[Td, Th]), Block),
            Td => ElementDef::normal(self, C::NONE, flow_model, Block),
            Th => ElementDef::normal(self, C::NONE, flow_model, Block)
                .excluding(no_headings, &[Header, Footer]),
            Form => ElementDef::normal(self, flow, flow_model, Block).excluding(C::NONE, &[Form]),
            Label => ElementDef::normal(self, interactive, phrasing_model, Inline)
                .excluding(C::NONE, &[Label]),
            Input => ElementDef::void(self, interactive, Inline),
            Button => ElementDef::normal(self, interactive, phrasing_model, Inline)
                .excluding(C::INTERACTIVE, &[]),
            Select => ElementDef::normal(
                self,
                interactive,
                ContentModel::only(&[Option, Optgroup]),
                Block,
            ),
            Datalist => ElementDef::normal(
                self,
                C::FLOW | C::PHRASING,
                phrasing_model.with(&[Option]),
                Block,
            )
            .html5(),
            Optgroup => ElementDef::normal(self, C::NONE, ContentModel::only(&[Option]), Block),
            Option => ElementDef::normal(self, C::NONE, text_model, Block),
            Textarea => ElementDef::normal(self, interactive, text_model, Verbatim),
            Progress => ElementDef::normal(self, phrasing, phrasing_model, Inline)
                .html5()
                .excluding(C::NONE, &[Progress]),
            Meter => ElementDef::normal(self, phrasing, phrasing_model, Inline)
                .html5()
                .excluding(C::NONE, &[Meter]),
            Fieldset => ElementDef::normal(self, flow, flow_model.with(&[Legend]), Block),
            Legend => ElementDef::normal(self, C::NONE, phrasing_model, Block),
            Details => ElementDef::normal(
                self,
                flow | C::INTERACTIVE,
                flow_model.with(&[Summary]),
                Block,
            )
            .html5(),
            Summary => ElementDef::normal(
                self,
                C::NONE,
                ContentModel::of(C::PHRASING | C::HEADING),
                Block,
            )
            .html5(),
            Dialog => ElementDef::normal(self, C::FLOW, flow_model, Block).html5(),
            Canvas => {
                ElementDef::normal(self, embedded, ContentModel::transparent(), Inline).html5()
            }
            Acronym | Big | Tt => ElementDef::normal(self, phrasing, phrasing_model, Inline)
                .support(Support::Html4Only),
        }
    }
}

//! CSS Property Definitions
//!
//! The style properties this engine exposes on `element.style`, keyed by
//! their camelCase IDL name. A few only exist in vendor-prefixed form.

use crate::color::Color;
use crate::computed::split_tokens;

/// How a property's values are normalized when computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Serialized as `rgb()`/`rgba()`
    Color,
    /// Kept as written
    Keyword,
}

/// Static description of one property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    /// camelCase IDL name
    pub name: &'static str,
    /// Initial (computed) value
    pub initial: &'static str,
    /// Inherited by default
    pub inherited: bool,
    pub kind: ValueKind,
}

const fn prop(name: &'static str, initial: &'static str, inherited: bool) -> PropertyInfo {
    PropertyInfo { name, initial, inherited, kind: ValueKind::Keyword }
}

const fn color(name: &'static str, initial: &'static str, inherited: bool) -> PropertyInfo {
    PropertyInfo { name, initial, inherited, kind: ValueKind::Color }
}

/// All supported properties
pub static PROPERTIES: &[PropertyInfo] = &[
    // Display & Layout
    prop("display", "inline", false),
    prop("position", "static", false),
    prop("float", "none", false),
    prop("clear", "none", false),
    prop("boxSizing", "content-box", false),
    prop("overflow", "visible", false),
    prop("overflowX", "visible", false),
    prop("overflowY", "visible", false),
    prop("visibility", "visible", true),
    prop("zIndex", "auto", false),
    prop("top", "auto", false),
    prop("right", "auto", false),
    prop("bottom", "auto", false),
    prop("left", "auto", false),

    // Flexbox & Grid
    prop("flexDirection", "row", false),
    prop("flexWrap", "nowrap", false),
    prop("flexGrow", "0", false),
    prop("flexShrink", "1", false),
    prop("flexBasis", "auto", false),
    prop("justifyContent", "normal", false),
    prop("alignItems", "normal", false),
    prop("alignContent", "normal", false),
    prop("gap", "normal", false),
    prop("order", "0", false),
    prop("gridTemplateColumns", "none", false),
    prop("gridTemplateRows", "none", false),

    // Box Model
    prop("width", "auto", false),
    prop("height", "auto", false),
    prop("minWidth", "auto", false),
    prop("minHeight", "auto", false),
    prop("maxWidth", "none", false),
    prop("maxHeight", "none", false),
    prop("marginTop", "0px", false),
    prop("marginRight", "0px", false),
    prop("marginBottom", "0px", false),
    prop("marginLeft", "0px", false),
    prop("paddingTop", "0px", false),
    prop("paddingRight", "0px", false),
    prop("paddingBottom", "0px", false),
    prop("paddingLeft", "0px", false),

    // Border
    prop("borderTopWidth", "0px", false),
    prop("borderRightWidth", "0px", false),
    prop("borderBottomWidth", "0px", false),
    prop("borderLeftWidth", "0px", false),
    prop("borderStyle", "none", false),
    color("borderColor", "currentcolor", false),
    prop("borderRadius", "0px", false),
    color("outlineColor", "currentcolor", false),

    // Colors & Background
    color("color", "rgb(0, 0, 0)", true),
    color("backgroundColor", "rgba(0, 0, 0, 0)", false),
    prop("backgroundImage", "none", false),
    prop("opacity", "1", false),

    // Text
    prop("fontFamily", "serif", true),
    prop("fontSize", "16px", true),
    prop("fontWeight", "400", true),
    prop("fontStyle", "normal", true),
    prop("lineHeight", "normal", true),
    prop("letterSpacing", "normal", true),
    prop("wordSpacing", "0px", true),
    prop("textAlign", "start", true),
    prop("textTransform", "none", true),
    prop("textDecorationLine", "none", false),
    color("textDecorationColor", "currentcolor", false),
    prop("textIndent", "0px", true),
    prop("whiteSpace", "normal", true),
    prop("cursor", "auto", true),
    prop("direction", "ltr", true),
    prop("listStyleType", "disc", true),

    // Transforms & Animation
    prop("transform", "none", false),
    prop("transformOrigin", "50% 50% 0px", false),
    prop("transition", "all 0s ease 0s", false),
    prop("transitionDuration", "0s", false),
    prop("animationName", "none", false),
    prop("animationDuration", "0s", false),
    prop("pointerEvents", "auto", true),
    prop("userSelect", "auto", false),
    prop("appearance", "none", false),

    // Vendor-prefixed only
    prop("MozBoxFlex", "0", false),
    prop("MozOsxFontSmoothing", "auto", true),
    prop("WebkitBoxFlex", "0", false),
    prop("WebkitBoxOrient", "horizontal", false),
    prop("WebkitFontSmoothing", "auto", true),
    prop("WebkitLineClamp", "none", false),
    color("WebkitTapHighlightColor", "rgba(0, 0, 0, 0.18)", true),
    prop("WebkitTextStrokeWidth", "0px", true),
    color("WebkitTextStrokeColor", "currentcolor", true),
    color("WebkitTextFillColor", "currentcolor", true),
    prop("WebkitUserDrag", "auto", false),
    prop("msOverflowStyle", "auto", true),
];

/// Look up a property by camelCase name
pub fn lookup(name: &str) -> Option<&'static PropertyInfo> {
    PROPERTIES.iter().find(|p| p.name == name)
}

/// Shorthand and the longhands it sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shorthand {
    pub name: &'static str,
    pub longhands: &'static [&'static str],
    /// `top right bottom left` with the usual 1-4 value expansion
    pub edges: bool,
}

/// Supported shorthands
pub static SHORTHANDS: &[Shorthand] = &[
    Shorthand {
        name: "margin",
        longhands: &["marginTop", "marginRight", "marginBottom", "marginLeft"],
        edges: true,
    },
    Shorthand {
        name: "padding",
        longhands: &["paddingTop", "paddingRight", "paddingBottom", "paddingLeft"],
        edges: true,
    },
    Shorthand {
        name: "borderWidth",
        longhands: &["borderTopWidth", "borderRightWidth", "borderBottomWidth", "borderLeftWidth"],
        edges: true,
    },
    Shorthand {
        name: "background",
        longhands: &["backgroundColor", "backgroundImage"],
        edges: false,
    },
];

/// Look up a shorthand by camelCase name
pub fn shorthand(name: &str) -> Option<&'static Shorthand> {
    SHORTHANDS.iter().find(|s| s.name == name)
}

/// The static name of a supported longhand or shorthand
pub fn canonical(name: &str) -> Option<&'static str> {
    lookup(name).map(|p| p.name).or_else(|| shorthand(name).map(|s| s.name))
}

/// Is `name` present on the style interface?
pub fn is_supported(name: &str) -> bool {
    canonical(name).is_some()
}

/// CSS-wide keywords, valid for every property
pub const GLOBAL_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert"];

/// Would `element.style[name] = value` be accepted?
///
/// `name` is a camelCase longhand or shorthand. Values that end the
/// declaration early never are; colors must parse; edge shorthands take
/// one to four components.
pub fn accepts(name: &str, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || !dq_dom::style::is_single_value(value) {
        return false;
    }
    if GLOBAL_KEYWORDS.iter().any(|k| value.eq_ignore_ascii_case(k)) {
        return true;
    }
    if let Some(info) = lookup(name) {
        return match info.kind {
            ValueKind::Color => value.eq_ignore_ascii_case("currentcolor") || Color::parse(value).is_some(),
            ValueKind::Keyword => true,
        };
    }
    match shorthand(name) {
        Some(sh) if sh.edges => (1..=4).contains(&split_tokens(value).len()),
        Some(_) => true,
        None => false,
    }
}

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "details", "dialog", "div",
    "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hgroup", "hr", "html", "main", "nav", "ol", "p", "pre",
    "section", "summary", "ul",
];

const HIDDEN_ELEMENTS: &[&str] = &[
    "head", "link", "meta", "script", "style", "template", "title",
];

/// User-agent default for `display`
pub fn default_display(tag: &str) -> &'static str {
    match tag {
        t if BLOCK_ELEMENTS.contains(&t) => "block",
        t if HIDDEN_ELEMENTS.contains(&t) => "none",
        "li" => "list-item",
        "table" => "table",
        "tr" => "table-row",
        "td" | "th" => "table-cell",
        "thead" => "table-header-group",
        "tbody" => "table-row-group",
        "tfoot" => "table-footer-group",
        "button" | "input" | "select" | "textarea" | "img" => "inline-block",
        _ => "inline",
    }
}

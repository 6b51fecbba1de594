//! Computed Styles
//!
//! Resolved values for an element: user-agent defaults, inheritance from the
//! parent element and the element's inline declarations. There is no
//! stylesheet cascade, so inline style is the only author origin.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use dq_dom::style::camel_case;
use dq_dom::{DomTree, ElementData, NodeId};

use crate::color::Color;
use crate::properties::{self, PropertyInfo, Shorthand, ValueKind, PROPERTIES};
use crate::selectors::parent_element;

/// Computed style for an element, keyed by camelCase property name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    values: BTreeMap<&'static str, String>,
    /// Color properties whose computed value is the `currentcolor` keyword
    follows_color: BTreeSet<&'static str>,
}

impl ComputedStyle {
    /// Computed value of a longhand or shorthand, by camelCase name
    pub fn get(&self, property: &str) -> Option<String> {
        if let Some(value) = self.values.get(property) {
            return Some(value.clone());
        }
        let sh = properties::shorthand(property)?;
        let parts: Vec<&str> = sh.longhands.iter()
            .filter_map(|name| self.values.get(name).map(String::as_str))
            .collect();
        Some(if sh.edges { serialize_edges(&parts) } else { parts.join(" ") })
    }

    /// `getPropertyValue`: hyphenated name, empty string when unsupported
    pub fn get_property_value(&self, property: &str) -> String {
        self.get(&camel_case(property)).unwrap_or_default()
    }

    /// All longhands in name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Compute the style of `node`; `None` when it isn't an element
pub fn computed_style(tree: &DomTree, node: NodeId) -> Option<ComputedStyle> {
    tree.element(node)?;

    let mut chain = vec![node];
    let mut current = node;
    while let Some(parent) = parent_element(tree, current) {
        chain.push(parent);
        current = parent;
    }

    let mut style: Option<ComputedStyle> = None;
    for &id in chain.iter().rev() {
        let element = tree.element(id)?;
        style = Some(compute_element(element, style.as_ref()));
    }
    tracing::trace!("Computed style for {:?} over {} ancestors", node, chain.len() - 1);
    style
}

fn compute_element(element: &ElementData, parent: Option<&ComputedStyle>) -> ComputedStyle {
    let declared = declared_values(element);
    let mut values: BTreeMap<&'static str, String> = BTreeMap::new();
    let mut follows_color = BTreeSet::new();

    // `color` first: `currentcolor` elsewhere resolves against it
    let color_info = properties::lookup("color");
    let color = color_info
        .map(|info| compute_value(info, declared.get(info.name), element, parent, None))
        .unwrap_or_else(|| Color::BLACK.to_string());

    for info in PROPERTIES {
        let declared = declared.get(info.name);
        let value = if info.name == "color" {
            color.clone()
        } else if tracks_current_color(info, declared, parent) {
            follows_color.insert(info.name);
            color.clone()
        } else {
            compute_value(info, declared, element, parent, Some(&color))
        };
        values.insert(info.name, value);
    }

    ComputedStyle { values, follows_color }
}

/// Whether the computed value is `currentcolor`, which children inherit as
/// the keyword rather than as the parent's resolved color
fn tracks_current_color(info: &PropertyInfo, declared: Option<&String>, parent: Option<&ComputedStyle>) -> bool {
    if info.kind != ValueKind::Color {
        return false;
    }
    let initial = info.initial.eq_ignore_ascii_case("currentcolor");
    let from_parent = || parent.map_or(initial, |p| p.follows_color.contains(info.name));

    let Some(raw) = declared else {
        return if info.inherited { from_parent() } else { initial };
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "currentcolor" => true,
        "inherit" => from_parent(),
        "initial" => initial,
        "unset" | "revert" if info.inherited => from_parent(),
        "unset" | "revert" => initial,
        _ => false,
    }
}

fn compute_value(
    info: &PropertyInfo,
    declared: Option<&String>,
    element: &ElementData,
    parent: Option<&ComputedStyle>,
    current_color: Option<&str>,
) -> String {
    let inherited = || parent.and_then(|p| p.values.get(info.name).cloned());
    let initial = || resolve_keyword(info, info.initial, parent, current_color);
    let ua_default = || {
        if info.name == "display" {
            properties::default_display(element.local_name()).to_string()
        } else {
            initial()
        }
    };

    let Some(raw) = declared else {
        return if info.inherited {
            inherited().unwrap_or_else(ua_default)
        } else {
            ua_default()
        };
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "inherit" => inherited().unwrap_or_else(initial),
        "initial" => initial(),
        "unset" | "revert" if info.inherited => inherited().unwrap_or_else(initial),
        "unset" | "revert" => initial(),
        _ => match info.kind {
            ValueKind::Color => match parse_color(raw, parent, current_color, info) {
                Some(c) => c,
                // invalid colors are dropped at parse time
                None if info.inherited => inherited().unwrap_or_else(ua_default),
                None => ua_default(),
            },
            ValueKind::Keyword => raw.trim().to_string(),
        },
    }
}

fn resolve_keyword(
    info: &PropertyInfo,
    value: &str,
    parent: Option<&ComputedStyle>,
    current_color: Option<&str>,
) -> String {
    if info.kind == ValueKind::Color {
        if let Some(c) = parse_color(value, parent, current_color, info) {
            return c;
        }
    }
    value.to_string()
}

fn parse_color(
    value: &str,
    parent: Option<&ComputedStyle>,
    current_color: Option<&str>,
    info: &PropertyInfo,
) -> Option<String> {
    if value.trim().eq_ignore_ascii_case("currentcolor") {
        return match current_color {
            Some(c) => Some(c.to_string()),
            // `color: currentcolor` is the inherited color
            None => Some(
                parent
                    .and_then(|p| p.values.get(info.name).cloned())
                    .unwrap_or_else(|| Color::BLACK.to_string()),
            ),
        };
    }
    Color::parse(value).map(|c| c.to_string())
}

/// Inline declarations with shorthands expanded, later ones winning
fn declared_values(element: &ElementData) -> HashMap<&'static str, String> {
    let mut declared = HashMap::new();
    for (name, value) in element.style().iter() {
        if let Some(info) = properties::lookup(name) {
            declared.insert(info.name, value.to_string());
        } else if let Some(sh) = properties::shorthand(name) {
            expand_shorthand(sh, value, &mut declared);
        }
    }
    declared
}

fn expand_shorthand(sh: &Shorthand, value: &str, out: &mut HashMap<&'static str, String>) {
    let tokens = split_tokens(value);
    let keyword = value.trim().to_ascii_lowercase();
    if matches!(keyword.as_str(), "inherit" | "initial" | "unset" | "revert") {
        for &longhand in sh.longhands {
            out.insert(longhand, keyword.clone());
        }
        return;
    }

    if sh.edges {
        let [top, right, bottom, left] = match tokens.as_slice() {
            [a] => [a, a, a, a],
            [a, b] => [a, b, a, b],
            [a, b, c] => [a, b, c, b],
            [a, b, c, d] => [a, b, c, d],
            _ => return,
        };
        for (&longhand, v) in sh.longhands.iter().zip([top, right, bottom, left]) {
            out.insert(longhand, v.clone());
        }
        return;
    }

    // background: a color token and an image token, the rest reset
    let mut color = "transparent".to_string();
    let mut image = "none".to_string();
    for token in tokens {
        if Color::parse(&token).is_some() || token.eq_ignore_ascii_case("currentcolor") {
            color = token;
        } else if token.contains('(') || token.eq_ignore_ascii_case("none") {
            image = token;
        }
    }
    out.insert("backgroundColor", color);
    out.insert("backgroundImage", image);
}

/// Whitespace-separated tokens, keeping parenthesized groups together
pub(crate) fn split_tokens(value: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for c in value.trim().chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Shortest `top right bottom left` form
fn serialize_edges(parts: &[&str]) -> String {
    match parts {
        [t, r, b, l] if l == r && b == t && r == t => t.to_string(),
        [t, r, b, l] if l == r && b == t => format!("{} {}", t, r),
        [t, r, b, l] if l == r => format!("{} {} {}", t, r, b),
        _ => parts.join(" "),
    }
}

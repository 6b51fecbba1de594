//! CSS Selectors Module
//!
//! Selector data model and matching against a `DomTree`. Matching runs
//! right-to-left: the rightmost compound is tested on the candidate and each
//! combinator walks to parents or previous siblings from there.

use dq_dom::{DomTree, ElementData, NodeData, NodeId};

/// Comma-separated list of complex selectors
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

/// Compounds joined by combinators, left to right.
///
/// The combinator stored with a compound links it to the compound on its left,
/// so the first entry never carries one.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub parts: Vec<(Option<Combinator>, CompoundSelector)>,
}

/// Sequence of simple selectors applying to one element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// Relationship between two compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// Pseudo-element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoElement {
    Before,
    After,
    FirstLine,
    FirstLetter,
    Marker,
    Selection,
    Placeholder,
    Backdrop,
}

impl PseudoElement {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().trim_start_matches(':') {
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            "first-line" => Some(Self::FirstLine),
            "first-letter" => Some(Self::FirstLetter),
            "marker" => Some(Self::Marker),
            "selection" => Some(Self::Selection),
            "placeholder" => Some(Self::Placeholder),
            "backdrop" => Some(Self::Backdrop),
            _ => None,
        }
    }
}

/// Pseudo-class type
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    // Tree-structural pseudo-classes
    Root,
    Scope,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),

    // Logical pseudo-classes
    Not(SelectorList),
    Is(SelectorList),
    Where(SelectorList),
    /// Relative selectors, each anchored with a leading `:scope`
    Has(SelectorList),

    // Attribute-backed states
    Link,
    Checked,
    Disabled,
    Enabled,
    Required,
    Optional,
    Lang(String),

    /// User-interaction states (`:hover`, `:focus`, ...) never hold in a static tree
    Interactive(String),
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, PartialEq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// "odd" (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// "even" (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// Simple index (0n+b)
    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from string like "2n+1", "odd", "even", "3"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();

        match s.as_str() {
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        let s = s.replace(' ', "");
        let n_pos = s.find('n')?;
        let a_str = &s[..n_pos];
        let a = match a_str {
            "" | "+" => 1,
            "-" => -1,
            _ => a_str.parse().ok()?,
        };

        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else if rest.starts_with('+') || rest.starts_with('-') {
            rest.parse().ok()?
        } else {
            return None;
        };

        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        // widened so extreme coefficients cannot overflow
        let (a, diff) = (i64::from(self.a), i64::from(n) - i64::from(self.b));
        if a > 0 {
            diff >= 0 && diff % a == 0
        } else {
            diff <= 0 && diff % a == 0
        }
    }
}

/// A component of a compound selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :first-child, :not(), etc.
    PseudoClass(PseudoClass),
    /// Pseudo-element ::before; never matches an element itself
    PseudoElement(PseudoElement),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (matcher, val) = match (&self.matcher, value) {
            (None, found) => return found.is_some(),
            (Some(_), None) => return false,
            (Some(matcher), Some(val)) => (matcher, val),
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let val = fold(val);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                !expected.is_empty() && val.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            // Empty strings never match the substring operators
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && val.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && val.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && val.contains(&fold(expected))
            }
        }
    }
}

/// Per-match state
#[derive(Debug, Clone, Copy)]
pub struct MatchContext {
    /// Element `:scope` refers to
    pub scope: Option<NodeId>,
}

impl SelectorList {
    /// Does `element` match any selector in the list?
    pub fn matches(&self, tree: &DomTree, element: NodeId, ctx: MatchContext) -> bool {
        self.0.iter().any(|complex| complex.matches(tree, element, ctx))
    }
}

impl ComplexSelector {
    pub fn matches(&self, tree: &DomTree, element: NodeId, ctx: MatchContext) -> bool {
        if self.parts.is_empty() {
            return false;
        }
        matches_from(tree, element, &self.parts, self.parts.len() - 1, ctx)
    }
}

fn matches_from(
    tree: &DomTree,
    element: NodeId,
    parts: &[(Option<Combinator>, CompoundSelector)],
    idx: usize,
    ctx: MatchContext,
) -> bool {
    let (combinator, compound) = &parts[idx];
    if !compound.matches(tree, element, ctx) {
        return false;
    }
    let Some(combinator) = combinator else {
        return true;
    };
    if idx == 0 {
        return true;
    }

    match combinator {
        Combinator::Child => parent_element(tree, element)
            .is_some_and(|p| matches_from(tree, p, parts, idx - 1, ctx)),
        Combinator::Descendant => {
            let mut current = parent_element(tree, element);
            while let Some(ancestor) = current {
                if matches_from(tree, ancestor, parts, idx - 1, ctx) {
                    return true;
                }
                current = parent_element(tree, ancestor);
            }
            false
        }
        Combinator::NextSibling => prev_element_sibling(tree, element)
            .is_some_and(|s| matches_from(tree, s, parts, idx - 1, ctx)),
        Combinator::SubsequentSibling => {
            let mut current = prev_element_sibling(tree, element);
            while let Some(sibling) = current {
                if matches_from(tree, sibling, parts, idx - 1, ctx) {
                    return true;
                }
                current = prev_element_sibling(tree, sibling);
            }
            false
        }
    }
}

impl CompoundSelector {
    pub fn matches(&self, tree: &DomTree, element: NodeId, ctx: MatchContext) -> bool {
        let Some(data) = tree.element(element) else {
            return false;
        };
        self.components.iter()
            .all(|c| match_component(c, tree, element, data, ctx))
    }
}

/// Match a selector component against an element
pub fn match_component(
    component: &SelectorComponent,
    tree: &DomTree,
    element: NodeId,
    data: &ElementData,
    ctx: MatchContext,
) -> bool {
    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => data.local_name().eq_ignore_ascii_case(tag),
        SelectorComponent::Id(id) => data.id() == Some(id.as_str()),
        SelectorComponent::Class(class) => data.has_class(class),
        SelectorComponent::Attribute(attr) => attr.matches(data.get_attr(&attr.name)),
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(pseudo, tree, element, data, ctx),
        SelectorComponent::PseudoElement(_) => false,
    }
}

const FORM_CONTROLS: &[&str] = &[
    "button", "input", "select", "textarea", "optgroup", "option", "fieldset",
];

/// Match a pseudo-class against an element
pub fn match_pseudo_class(
    pseudo: &PseudoClass,
    tree: &DomTree,
    element: NodeId,
    data: &ElementData,
    ctx: MatchContext,
) -> bool {
    match pseudo {
        PseudoClass::Root => {
            tree.parent(element)
                .and_then(|p| tree.get(p))
                .is_some_and(|p| matches!(p.data, NodeData::Document))
        }
        PseudoClass::Scope => match ctx.scope {
            Some(scope) => scope == element,
            None => match_pseudo_class(&PseudoClass::Root, tree, element, data, ctx),
        },
        PseudoClass::Empty => tree.children(element).all(|(_, n)| {
            matches!(n.data, NodeData::Comment(_))
        }),

        PseudoClass::FirstChild => sibling_position(tree, element, None).0 == 1,
        PseudoClass::LastChild => {
            let (index, count) = sibling_position(tree, element, None);
            index == count
        }
        PseudoClass::OnlyChild => sibling_position(tree, element, None).1 == 1,
        PseudoClass::FirstOfType => sibling_position(tree, element, Some(data.local_name())).0 == 1,
        PseudoClass::LastOfType => {
            let (index, count) = sibling_position(tree, element, Some(data.local_name()));
            index == count
        }
        PseudoClass::OnlyOfType => sibling_position(tree, element, Some(data.local_name())).1 == 1,
        PseudoClass::NthChild(expr) => {
            expr.matches(sibling_position(tree, element, None).0 as i32)
        }
        PseudoClass::NthLastChild(expr) => {
            let (index, count) = sibling_position(tree, element, None);
            expr.matches((count - index + 1) as i32)
        }
        PseudoClass::NthOfType(expr) => {
            expr.matches(sibling_position(tree, element, Some(data.local_name())).0 as i32)
        }
        PseudoClass::NthLastOfType(expr) => {
            let (index, count) = sibling_position(tree, element, Some(data.local_name()));
            expr.matches((count - index + 1) as i32)
        }

        PseudoClass::Not(list) => !list.matches(tree, element, ctx),
        PseudoClass::Is(list) | PseudoClass::Where(list) => list.matches(tree, element, ctx),
        PseudoClass::Has(list) => {
            let inner = MatchContext { scope: Some(element) };
            has_candidates(tree, element).any(|candidate| list.matches(tree, candidate, inner))
        }

        PseudoClass::Link => {
            matches!(data.local_name(), "a" | "area") && data.has_attr("href")
        }
        PseudoClass::Checked => match data.local_name() {
            "input" => data.has_attr("checked"),
            "option" => data.has_attr("selected"),
            _ => false,
        },
        PseudoClass::Disabled => {
            FORM_CONTROLS.contains(&data.local_name()) && data.has_attr("disabled")
        }
        PseudoClass::Enabled => {
            FORM_CONTROLS.contains(&data.local_name()) && !data.has_attr("disabled")
        }
        PseudoClass::Required => is_input_like(data) && data.has_attr("required"),
        PseudoClass::Optional => is_input_like(data) && !data.has_attr("required"),
        PseudoClass::Lang(lang) => {
            let mut current = Some(element);
            while let Some(node) = current {
                if let Some(value) = tree.element(node).and_then(|e| e.get_attr("lang")) {
                    let value = value.to_ascii_lowercase();
                    let lang = lang.to_ascii_lowercase();
                    return value == lang || value.starts_with(&format!("{}-", lang));
                }
                current = tree.parent(node);
            }
            false
        }

        PseudoClass::Interactive(_) => false,
    }
}

fn is_input_like(data: &ElementData) -> bool {
    matches!(data.local_name(), "input" | "select" | "textarea")
}

/// Elements a relative `:has()` argument can reach from `element`
fn has_candidates(tree: &DomTree, element: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    let mut following = Vec::new();
    let mut sibling = tree.next_sibling(element);
    while let Some(s) = sibling {
        following.push(s);
        sibling = tree.next_sibling(s);
    }
    tree.descendants(element)
        .chain(following.into_iter().flat_map(move |s| std::iter::once(s).chain(tree.descendants(s))))
        .filter(move |&n| tree.get(n).is_some_and(|node| node.is_element()))
}

/// Parent if it is an element (the document node is not)
pub fn parent_element(tree: &DomTree, element: NodeId) -> Option<NodeId> {
    tree.parent(element).filter(|&p| tree.element(p).is_some())
}

fn prev_element_sibling(tree: &DomTree, element: NodeId) -> Option<NodeId> {
    let mut current = tree.prev_sibling(element);
    while let Some(node) = current {
        if tree.element(node).is_some() {
            return Some(node);
        }
        current = tree.prev_sibling(node);
    }
    None
}

/// 1-based index among element siblings and sibling count, optionally
/// restricted to one tag name. A parentless element is its own only sibling.
fn sibling_position(tree: &DomTree, element: NodeId, tag: Option<&str>) -> (usize, usize) {
    let Some(parent) = tree.parent(element) else {
        return (1, 1);
    };
    let mut index = 0;
    let mut count = 0;
    for sibling in tree.element_children(parent) {
        let counted = match tag {
            Some(tag) => tree.element(sibling).is_some_and(|e| e.local_name() == tag),
            None => true,
        };
        if counted {
            count += 1;
            if sibling == element {
                index = count;
            }
        }
    }
    (index, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(matcher: AttributeMatcher, case_insensitive: bool) -> AttributeSelector {
        AttributeSelector { name: "data-x".into(), matcher: Some(matcher), case_insensitive }
    }

    #[test]
    fn test_nth_keywords() {
        let odd: Vec<i32> = (1..=6).filter(|&n| NthExpression::odd().matches(n)).collect();
        let even: Vec<i32> = (1..=6).filter(|&n| NthExpression::even().matches(n)).collect();
        assert_eq!(odd, [1, 3, 5]);
        assert_eq!(even, [2, 4, 6]);
    }

    #[test]
    fn test_nth_forms() {
        let cases = [
            ("odd", Some((2, 1))),
            ("EVEN", Some((2, 0))),
            ("7", Some((0, 7))),
            ("3n", Some((3, 0))),
            ("4n+2", Some((4, 2))),
            ("-n+3", Some((-1, 3))),
            ("2n 1", None),
            ("n+", None),
            ("x", None),
        ];
        for (src, want) in cases {
            let want = want.map(|(a, b)| NthExpression::new(a, b));
            assert_eq!(NthExpression::parse(src), want, "{src}");
        }
    }

    #[test]
    fn test_nth_first_n() {
        let first_three: Vec<i32> = (1..=5).filter(|&n| NthExpression::new(-1, 3).matches(n)).collect();
        assert_eq!(first_three, [1, 2, 3]);
    }

    #[test]
    fn test_nth_extreme_coefficients() {
        let far = NthExpression::new(1, i32::MIN);
        assert!(far.matches(1));
        assert!(!NthExpression::new(i32::MIN, i32::MAX).matches(1));
        assert!(NthExpression::new(-1, i32::MAX).matches(i32::MAX));
        assert_eq!(NthExpression::parse("n-2147483648"), Some(far));
    }

    #[test]
    fn test_attribute_presence() {
        let sel = AttributeSelector { name: "hidden".into(), matcher: None, case_insensitive: false };
        assert!(sel.matches(Some("")));
        assert!(!sel.matches(None));
    }

    #[test]
    fn test_attribute_operators() {
        let value = Some("nav-item main");
        assert!(attr(AttributeMatcher::Contains("main".into()), false).matches(value));
        assert!(!attr(AttributeMatcher::Contains("mai".into()), false).matches(value));
        assert!(attr(AttributeMatcher::DashMatch("nav".into()), false).matches(value));
        assert!(attr(AttributeMatcher::Suffix("MAIN".into()), true).matches(value));
        assert!(!attr(AttributeMatcher::Suffix("MAIN".into()), false).matches(value));
        assert!(!attr(AttributeMatcher::Exact("nav".into()), false).matches(None));
    }

    #[test]
    fn test_empty_operand_never_matches() {
        for matcher in [
            AttributeMatcher::Prefix(String::new()),
            AttributeMatcher::Suffix(String::new()),
            AttributeMatcher::Substring(String::new()),
            AttributeMatcher::Contains(String::new()),
        ] {
            assert!(!attr(matcher, false).matches(Some("anything")));
        }
    }

    #[test]
    fn test_pseudo_element_names() {
        assert_eq!(PseudoElement::parse("::marker"), Some(PseudoElement::Marker));
        assert_eq!(PseudoElement::parse("first-letter"), Some(PseudoElement::FirstLetter));
        assert_eq!(PseudoElement::parse("::unknown"), None);
    }
}

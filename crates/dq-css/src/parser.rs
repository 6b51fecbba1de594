//! Selector parser
//!
//! Hand-written recursive descent over the selector text. Produces a
//! `SelectorList`; anything it does not understand is a `SelectorError`.

use crate::SelectorError;
use crate::selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, PseudoElement, SelectorComponent, SelectorList,
};

/// Parse a selector list such as `ul > li.active, #main a[href^="http"]`
pub fn parse_selector(selector: &str) -> Result<SelectorList, SelectorError> {
    if selector.trim().is_empty() {
        return Err(SelectorError::Empty);
    }
    let mut parser = SelectorParser { source: selector, pos: 0 };
    let list = parser.parse_list(false)?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(list)
}

struct SelectorParser<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    fn error(&self, reason: &str) -> SelectorError {
        SelectorError::Invalid {
            selector: self.source.to_string(),
            reason: format!("{} at offset {}", reason, self.pos),
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", expected)))
        }
    }

    /// Skip whitespace, reporting whether any was seen
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    /// Comma-separated complex selectors; `relative` allows a leading combinator
    fn parse_list(&mut self, relative: bool) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_complex(relative)?);
            self.skip_whitespace();
            if !self.eat(',') {
                break;
            }
        }
        Ok(SelectorList(selectors))
    }

    fn parse_combinator(&mut self) -> Option<Combinator> {
        let combinator = match self.peek()? {
            '>' => Combinator::Child,
            '+' => Combinator::NextSibling,
            '~' => Combinator::SubsequentSibling,
            _ => return None,
        };
        self.bump();
        Some(combinator)
    }

    fn parse_complex(&mut self, relative: bool) -> Result<ComplexSelector, SelectorError> {
        let mut parts = Vec::new();

        if relative {
            // `:has(> p)` is `:scope > p`
            let leading = self.parse_combinator().unwrap_or(Combinator::Descendant);
            self.skip_whitespace();
            let scope = CompoundSelector {
                components: vec![SelectorComponent::PseudoClass(PseudoClass::Scope)],
            };
            parts.push((None, scope));
            parts.push((Some(leading), self.parse_compound()?));
        } else {
            parts.push((None, self.parse_compound()?));
        }

        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.parse_combinator() {
                Some(c) => {
                    self.skip_whitespace();
                    c
                }
                None if had_space && self.starts_compound() => Combinator::Descendant,
                None => break,
            };
            parts.push((Some(combinator), self.parse_compound()?));
        }

        Ok(ComplexSelector { parts })
    }

    fn starts_compound(&self) -> bool {
        match self.peek() {
            Some(c) => matches!(c, '*' | '#' | '.' | '[' | ':' | '\\') || is_ident_start(c),
            None => false,
        }
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut components = Vec::new();

        if self.eat('*') {
            components.push(SelectorComponent::Universal);
        } else if self.peek().is_some_and(|c| is_ident_start(c) || c == '\\') {
            components.push(SelectorComponent::Type(self.parse_ident()?.to_ascii_lowercase()));
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    components.push(SelectorComponent::Id(self.parse_ident()?));
                }
                Some('.') => {
                    self.bump();
                    components.push(SelectorComponent::Class(self.parse_ident()?));
                }
                Some('[') => {
                    self.bump();
                    components.push(SelectorComponent::Attribute(self.parse_attribute()?));
                }
                Some(':') => {
                    self.bump();
                    components.push(self.parse_pseudo()?);
                }
                Some('|') => return Err(self.error("namespaces are not supported")),
                _ => break,
            }
        }

        if components.is_empty() {
            return Err(self.error("expected a selector"));
        }
        Ok(CompoundSelector { components })
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let mut ident = String::new();
        if self.peek() == Some('-') {
            ident.push('-');
            self.bump();
        }
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                match self.bump() {
                    Some(escaped) => ident.push(escaped),
                    None => return Err(self.error("dangling escape")),
                }
            } else if is_ident_char(c) {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if ident.is_empty() || ident == "-" || ident.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error("expected an identifier"));
        }
        Ok(ident)
    }

    fn parse_string(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(value),
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        if self.eat(']') {
            return Ok(AttributeSelector { name, matcher: None, case_insensitive: false });
        }

        let op = match self.bump() {
            Some('=') => None,
            Some(c @ ('~' | '|' | '^' | '$' | '*')) => {
                self.expect('=')?;
                Some(c)
            }
            _ => return Err(self.error("expected an attribute operator")),
        };
        self.skip_whitespace();

        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.bump();
                self.parse_string(q)?
            }
            _ => self.parse_ident()?,
        };
        self.skip_whitespace();

        let mut case_insensitive = false;
        if let Some(flag @ ('i' | 'I' | 's' | 'S')) = self.peek() {
            self.bump();
            case_insensitive = flag.eq_ignore_ascii_case(&'i');
            self.skip_whitespace();
        }
        self.expect(']')?;

        let matcher = match op {
            None => AttributeMatcher::Exact(value),
            Some('~') => AttributeMatcher::Contains(value),
            Some('|') => AttributeMatcher::DashMatch(value),
            Some('^') => AttributeMatcher::Prefix(value),
            Some('$') => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };
        Ok(AttributeSelector { name, matcher: Some(matcher), case_insensitive })
    }

    fn parse_pseudo(&mut self) -> Result<SelectorComponent, SelectorError> {
        let double = self.eat(':');
        let name = self.parse_ident()?.to_ascii_lowercase();

        if double {
            return PseudoElement::parse(&name)
                .map(SelectorComponent::PseudoElement)
                .ok_or_else(|| self.error("unknown pseudo-element"));
        }

        if self.eat('(') {
            let pseudo = self.parse_functional_pseudo(&name)?;
            self.skip_whitespace();
            self.expect(')')?;
            return Ok(SelectorComponent::PseudoClass(pseudo));
        }

        let pseudo = match name.as_str() {
            // CSS2 pseudo-elements accept the single-colon form
            "before" | "after" | "first-line" | "first-letter" => {
                return PseudoElement::parse(&name)
                    .map(SelectorComponent::PseudoElement)
                    .ok_or_else(|| self.error("unknown pseudo-element"));
            }
            "root" => PseudoClass::Root,
            "scope" => PseudoClass::Scope,
            "empty" => PseudoClass::Empty,
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "only-child" => PseudoClass::OnlyChild,
            "first-of-type" => PseudoClass::FirstOfType,
            "last-of-type" => PseudoClass::LastOfType,
            "only-of-type" => PseudoClass::OnlyOfType,
            "link" | "any-link" => PseudoClass::Link,
            "checked" => PseudoClass::Checked,
            "disabled" => PseudoClass::Disabled,
            "enabled" => PseudoClass::Enabled,
            "required" => PseudoClass::Required,
            "optional" => PseudoClass::Optional,
            "hover" | "active" | "focus" | "focus-visible" | "focus-within" | "visited"
            | "target" | "indeterminate" | "placeholder-shown" | "read-only"
            | "read-write" | "valid" | "invalid" | "default" => PseudoClass::Interactive(name.clone()),
            _ => return Err(self.error("unknown pseudo-class")),
        };
        Ok(SelectorComponent::PseudoClass(pseudo))
    }

    fn parse_functional_pseudo(&mut self, name: &str) -> Result<PseudoClass, SelectorError> {
        self.skip_whitespace();
        let pseudo = match name {
            "not" => PseudoClass::Not(self.parse_list(false)?),
            "is" | "matches" => PseudoClass::Is(self.parse_list(false)?),
            "where" => PseudoClass::Where(self.parse_list(false)?),
            "has" => PseudoClass::Has(self.parse_list(true)?),
            "nth-child" => PseudoClass::NthChild(self.parse_nth()?),
            "nth-last-child" => PseudoClass::NthLastChild(self.parse_nth()?),
            "nth-of-type" => PseudoClass::NthOfType(self.parse_nth()?),
            "nth-last-of-type" => PseudoClass::NthLastOfType(self.parse_nth()?),
            "lang" => PseudoClass::Lang(self.parse_ident()?),
            _ => return Err(self.error("unknown functional pseudo-class")),
        };
        Ok(pseudo)
    }

    fn parse_nth(&mut self) -> Result<NthExpression, SelectorError> {
        let end = self.rest().find(')').ok_or_else(|| self.error("expected ')'"))?;
        let raw = &self.rest()[..end];
        let expr = NthExpression::parse(raw).ok_or_else(|| self.error("invalid An+B expression"))?;
        self.pos += end;
        Ok(expr)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound_of(list: &SelectorList) -> &[SelectorComponent] {
        &list.0[0].parts[0].1.components
    }

    #[test]
    fn test_parse_compound() {
        let list = parse_selector("div#main.wide.dark").unwrap();
        assert_eq!(
            compound_of(&list),
            &[
                SelectorComponent::Type("div".into()),
                SelectorComponent::Id("main".into()),
                SelectorComponent::Class("wide".into()),
                SelectorComponent::Class("dark".into()),
            ]
        );
    }

    #[test]
    fn test_parse_combinators() {
        let list = parse_selector("ul  >li + li ~ p span").unwrap();
        let combinators: Vec<_> = list.0[0].parts.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            combinators,
            vec![
                None,
                Some(Combinator::Child),
                Some(Combinator::NextSibling),
                Some(Combinator::SubsequentSibling),
                Some(Combinator::Descendant),
            ]
        );
    }

    #[test]
    fn test_parse_group() {
        let list = parse_selector("h1, h2 ,h3").unwrap();
        assert_eq!(list.0.len(), 3);
    }

    #[test]
    fn test_parse_attribute_forms() {
        let list = parse_selector(r#"a[href^="http"][ data-x = 'y z' i][hidden]"#).unwrap();
        let components = compound_of(&list);
        assert_eq!(components.len(), 4);
        assert_eq!(
            components[2],
            SelectorComponent::Attribute(AttributeSelector {
                name: "data-x".into(),
                matcher: Some(AttributeMatcher::Exact("y z".into())),
                case_insensitive: true,
            })
        );
    }

    #[test]
    fn test_parse_pseudo_classes() {
        let list = parse_selector("li:nth-child(2n+1):not(.skip, #x)").unwrap();
        let components = compound_of(&list);
        assert_eq!(
            components[1],
            SelectorComponent::PseudoClass(PseudoClass::NthChild(NthExpression::new(2, 1)))
        );
        assert!(matches!(
            &components[2],
            SelectorComponent::PseudoClass(PseudoClass::Not(inner)) if inner.0.len() == 2
        ));
    }

    #[test]
    fn test_parse_relative_has() {
        let list = parse_selector("section:has(> h2)").unwrap();
        let SelectorComponent::PseudoClass(PseudoClass::Has(inner)) = &compound_of(&list)[1] else {
            panic!("expected :has");
        };
        let parts = &inner.0[0].parts;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].0, Some(Combinator::Child));
    }

    #[test]
    fn test_parse_pseudo_elements() {
        assert!(parse_selector("p::before").is_ok());
        assert!(parse_selector("p:after").is_ok());
        assert!(parse_selector("p::unknown").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_selector("   "), Err(SelectorError::Empty));
        for bad in ["div >", "> div", "a,", "[href", "#", ".1x", ":nope", "p:nth-child(x)", "a | b", "div)"] {
            assert!(
                matches!(parse_selector(bad), Err(SelectorError::Invalid { .. })),
                "expected error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_escaped_identifiers() {
        let list = parse_selector(r"#a\:b").unwrap();
        assert_eq!(compound_of(&list), &[SelectorComponent::Id("a:b".into())]);
    }
}

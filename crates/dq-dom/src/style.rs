//! Inline style declarations (`element.style`)
//!
//! Declarations are keyed by their camelCase IDL name (`backgroundColor`,
//! `WebkitLineClamp`) and serialized back to hyphenated CSS text.

/// Ordered inline declarations of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the contents of a `style` attribute
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        for decl in split_declarations(css_text) {
            let Some((name, value)) = decl.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = strip_important(value.trim());
            if name.is_empty() || value.is_empty() {
                continue;
            }
            let key = if name.starts_with("--") {
                name.to_string()
            } else {
                camel_case(&name.to_ascii_lowercase())
            };
            style.set(&key, value);
        }
        style
    }

    /// Get a declaration by camelCase name
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set a declaration; an empty value removes it. A value that would
    /// end its declaration early is rejected and `false` returned.
    pub fn set(&mut self, property: &str, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            self.remove(property);
            return true;
        }
        if !is_single_value(value) {
            return false;
        }
        match self.declarations.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.declarations.push((property.to_string(), value.to_string())),
        }
        true
    }

    /// Remove a declaration, returning its value
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let pos = self.declarations.iter().position(|(name, _)| name == property)?;
        Some(self.declarations.remove(pos).1)
    }

    /// Declarations in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize as `cssText`
    pub fn to_css_text(&self) -> String {
        self.declarations.iter()
            .map(|(name, value)| format!("{}: {};", hyphenate(name), value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// No `;`, `{`, `}` or `!` outside quoted strings, and every quote closed
pub fn is_single_value(value: &str) -> bool {
    let mut quote = None;
    let mut escaped = false;
    for c in value.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, ';' | '{' | '}' | '!') => return false,
            (None, _) => {}
        }
    }
    quote.is_none()
}

/// Split `cssText` on semicolons outside quoted strings
fn split_declarations(css_text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote = None;
    let mut escaped = false;
    for (i, c) in css_text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, ';') => {
                parts.push(&css_text[start..i]);
                start = i + 1;
            }
            (None, _) => {}
        }
    }
    parts.push(&css_text[start..]);
    parts
}

/// Drop a trailing `!important` from attribute text
fn strip_important(value: &str) -> &str {
    let Some(pos) = value.rfind('!') else {
        return value;
    };
    if value[pos + 1..].trim().eq_ignore_ascii_case("important") {
        value[..pos].trim_end()
    } else {
        value
    }
}

/// `font-family` => `fontFamily`, `-webkit-line-clamp` => `WebkitLineClamp`
pub fn camel_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut chars = property.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_alphanumeric() || next == '_' {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Inverse of [`camel_case`]: `msOverflowStyle` => `-ms-overflow-style`
pub fn hyphenate(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    let mut out = String::with_capacity(property.len() + 4);
    // `ms` is the one lowercase vendor prefix
    let lower_ms = property.starts_with("ms")
        && property[2..].starts_with(|c: char| c.is_ascii_uppercase());
    if lower_ms {
        out.push('-');
    }
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

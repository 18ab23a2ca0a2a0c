// File: crates/chart-xml/src/value.rs
// Summary: Typed literal interpretation of attribute text, keeping the raw text alongside.

use std::fmt;

/// A literal read from attribute text.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Str(String),
    /// Tuple or list, possibly nested.
    Seq(Vec<Value>),
    None,
}

impl Value {
    /// Interpret `raw` as a literal: numbers, `True`/`False`, `None`, quoted
    /// strings, `(..)`/`[..]` sequences and bare comma tuples (`1, 2`).
    /// Text that is not a complete literal is kept as `Value::Str(raw)`.
    pub fn interpret(raw: &str) -> Value {
        let mut p = Parser { src: raw.trim(), pos: 0 };
        match p.top_level() {
            Some(v) if p.at_end() => v,
            _ => Value::Str(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// All items as numbers, when this is a sequence of numbers.
    pub fn as_numbers(&self) -> Option<Vec<f64>> {
        self.as_seq()?.iter().map(Value::as_f64).collect()
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Str(s) => f.write_str(s),
            Value::None => f.write_str("None"),
            Value::Seq(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// One attribute: the text as written and its interpretation.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub raw: String,
    pub value: Value,
}

impl Attribute {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = Value::interpret(&raw);
        Self { raw, value }
    }

    /// The string form: the unquoted text of a string literal, otherwise the raw text.
    pub fn text(&self) -> &str {
        match &self.value {
            Value::Str(s) => s,
            _ => self.raw.trim(),
        }
    }
}

/// Attributes of one element in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, Attribute)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `name`.
    pub fn insert(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        let name = name.into();
        let attr = Attribute::new(raw);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = attr,
            None => self.entries.push((name, attr)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove and return `name`.
    pub fn take(&mut self, name: &str) -> Option<Attribute> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Attributes {
    type Item = (String, Attribute);
    type IntoIter = std::vec::IntoIter<(String, Attribute)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

// ---- literal parser ---------------------------------------------------------

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.pos == self.src.len()
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// `a, b, c` at the top level is a tuple.
    fn top_level(&mut self) -> Option<Value> {
        let first = self.expr()?;
        if !self.eat(',') {
            return Some(first);
        }
        let mut items = vec![first];
        while !self.at_end() {
            items.push(self.expr()?);
            if !self.eat(',') {
                break;
            }
        }
        Some(Value::Seq(items))
    }

    fn expr(&mut self) -> Option<Value> {
        self.skip_ws();
        match self.peek()? {
            '(' => self.sequence(')', true),
            '[' => self.sequence(']', false),
            '\'' | '"' => self.string(),
            '+' | '-' => {
                let neg = self.bump()? == '-';
                match self.expr()? {
                    Value::Number(n) => Some(Value::Number(if neg { -n } else { n })),
                    _ => None,
                }
            }
            c if c.is_ascii_digit() || c == '.' => self.number(),
            c if c.is_alphabetic() || c == '_' => self.keyword(),
            _ => None,
        }
    }

    /// `(x)` is just `x`; `(x,)` and `(x, y)` are tuples.
    fn sequence(&mut self, close: char, paren: bool) -> Option<Value> {
        self.bump();
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            if self.eat(close) {
                break;
            }
            items.push(self.expr()?);
            trailing_comma = self.eat(',');
            if !trailing_comma {
                if !self.eat(close) {
                    return None;
                }
                break;
            }
        }
        if paren && items.len() == 1 && !trailing_comma {
            return items.pop();
        }
        Some(Value::Seq(items))
    }

    fn string(&mut self) -> Option<Value> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(Value::Str(out)),
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    c @ ('\\' | '\'' | '"') => out.push(c),
                    c => {
                        out.push('\\');
                        out.push(c);
                    }
                },
                c => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Option<Value> {
        let rest = self.rest();
        let bytes = rest.as_bytes();
        let mut end = 0;
        let digits = |end: &mut usize| {
            let start = *end;
            while *end < bytes.len() && (bytes[*end].is_ascii_digit() || bytes[*end] == b'_') {
                *end += 1;
            }
            *end > start
        };
        let mut any = digits(&mut end);
        if end < bytes.len() && bytes[end] == b'.' {
            end += 1;
            any |= digits(&mut end);
        }
        if !any {
            return None;
        }
        if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
            let mut e = end + 1;
            if e < bytes.len() && (bytes[e] == b'+' || bytes[e] == b'-') {
                e += 1;
            }
            if digits(&mut e) {
                end = e;
            } else {
                return None;
            }
        }
        // `3abc` is not a number
        if rest[end..].chars().next().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            return None;
        }
        let text: String = rest[..end].chars().filter(|c| *c != '_').collect();
        let n = text.parse::<f64>().ok()?;
        self.pos += end;
        Some(Value::Number(n))
    }

    fn keyword(&mut self) -> Option<Value> {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let value = match &rest[..end] {
            "True" => Value::Bool(true),
            "False" => Value::Bool(false),
            "None" => Value::None,
            _ => return None,
        };
        self.pos += end;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn scalars() {
        assert_eq!(Value::interpret("3"), num(3.0));
        assert_eq!(Value::interpret(" -2.5e-1"), num(-0.25));
        assert_eq!(Value::interpret(".5"), num(0.5));
        assert_eq!(Value::interpret("1_000"), num(1000.0));
        assert_eq!(Value::interpret("True"), Value::Bool(true));
        assert_eq!(Value::interpret("None"), Value::None);
        assert_eq!(Value::interpret("'red'"), Value::Str("red".into()));
    }

    #[test]
    fn sequences() {
        assert_eq!(Value::interpret("(1,2)"), Value::Seq(vec![num(1.0), num(2.0)]));
        assert_eq!(Value::interpret("[1, [2, 3]]"), Value::Seq(vec![num(1.0), Value::Seq(vec![num(2.0), num(3.0)])]));
        assert_eq!(Value::interpret("(4)"), num(4.0));
        assert_eq!(Value::interpret("(4,)"), Value::Seq(vec![num(4.0)]));
        assert_eq!(Value::interpret("0, 1"), Value::Seq(vec![num(0.0), num(1.0)]));
        assert_eq!(Value::interpret("()"), Value::Seq(vec![]));
    }

    #[test]
    fn non_literals_stay_raw() {
        for raw in ["--", "-", ":", "tab:blue", "o", "", "true", "inf", "3abc", "(1,", "x y", "1 2"] {
            assert_eq!(Value::interpret(raw), Value::Str(raw.to_string()), "raw {raw:?}");
        }
    }

    #[test]
    fn attribute_text_unquotes_strings() {
        assert_eq!(Attribute::new("'--'").text(), "--");
        assert_eq!(Attribute::new("0.5").text(), "0.5");
        assert_eq!(Attribute::new("dotted").text(), "dotted");
    }

    #[test]
    fn attributes_keep_order_and_take() {
        let mut attrs: Attributes = [("x", ""), ("y", "a"), ("color", "r")].into_iter().collect();
        assert_eq!(attrs.take("y").map(|a| a.raw), Some("a".to_string()));
        let names: Vec<&str> = attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "color"]);
        assert!(attrs.take("y").is_none());
    }
}

//! Symbols, symbol sequences and the tokenizer that produces them.
//!
//! The serialized form is `<char>` for a bare symbol and `<char>(<p1>,<p2>,...)` for a
//! parametrized module. Parameters stay raw text until a rule or the interpreter reads
//! them, since some rules treat them as free-form strings.

use crate::error::{LSystemError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Opens a module's parameter list; never valid as an identifier.
const MODULE_OPEN: char = '(';
/// Closes a module's parameter list.
const MODULE_CLOSE: char = ')';
/// Separates parameters inside a module.
const PARAM_SEPARATOR: char = ',';

/// One identifying character plus an ordered parameter list.
///
/// Immutable once created; rewriting always builds new symbols. The constructors only
/// produce symbols whose serialized form tokenizes back to the same symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSymbol")]
pub struct Symbol {
    id: char,
    params: Vec<String>,
}

#[derive(Deserialize)]
struct RawSymbol {
    id: char,
    #[serde(default)]
    params: Vec<String>,
}

impl TryFrom<RawSymbol> for Symbol {
    type Error = LSystemError;

    fn try_from(raw: RawSymbol) -> Result<Self> {
        Symbol::with_params(raw.id, raw.params)
    }
}

impl Symbol {
    /// A bare symbol with no parameters. `(` is rejected.
    pub fn new(id: char) -> Result<Self> {
        check_identifier(id)?;
        Ok(Self::bare(id))
    }

    /// A module carrying the given parameters in order. `(` is rejected as identifier.
    ///
    /// Parameters are normalized to what the tokenizer would read back: text containing
    /// `,` splits into several parameters, `)` is removed, and a list that joins to
    /// nothing (e.g. `[""]`) becomes a bare symbol.
    pub fn with_params<I, S>(id: char, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        check_identifier(id)?;
        Ok(Self::normalized(id, params))
    }

    /// Unchecked module; callers guarantee `id` is not `(`.
    fn normalized<I, S>(id: char, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = params
            .into_iter()
            .map(Into::into)
            .collect::<Vec<String>>()
            .join(",")
            .replace(MODULE_CLOSE, "");
        Self::from_param_text(id, &text)
    }

    /// Unchecked bare symbol; callers guarantee `id` is not `(`.
    pub(crate) fn bare(id: char) -> Self {
        Self {
            id,
            params: Vec::new(),
        }
    }

    /// Splits the text between `(` and `)` on commas. Empty text means no parameters.
    fn from_param_text(id: char, text: &str) -> Self {
        Self {
            id,
            params: if text.is_empty() {
                Vec::new()
            } else {
                text.split(PARAM_SEPARATOR).map(str::to_string).collect()
            },
        }
    }

    pub fn id(&self) -> char {
        self.id
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// Raw text of the parameter at `idx`.
    pub fn param(&self, idx: usize) -> Option<&str> {
        self.params.get(idx).map(String::as_str)
    }

    /// The parameter at `idx` parsed as a number, `None` if absent or not numeric.
    pub fn numeric_param(&self, idx: usize) -> Option<f64> {
        parse_numeric(self.param(idx)?)
    }
}

fn check_identifier(id: char) -> Result<()> {
    if id == MODULE_OPEN {
        return Err(LSystemError::InvalidSymbol { id });
    }
    Ok(())
}

/// Parses parameter text as a finite number, ignoring surrounding whitespace.
pub fn parse_numeric(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if !self.params.is_empty() {
            write!(f, "({})", self.params.join(","))?;
        }
        Ok(())
    }
}

/// Ordered list of symbols in left-to-right rewrite/interpretation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolSequence(Vec<Symbol>);

impl SymbolSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treats every character of `text` as a bare symbol. Meant for module-free
    /// literals such as `"F[+F0]-F0"`; any `(` fails with [`LSystemError::InvalidSymbol`].
    pub fn from_chars(text: &str) -> Result<Self> {
        text.chars().map(Symbol::new).collect()
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.0.push(symbol);
    }

    /// Appends copies of every symbol of `other`, preserving order.
    pub fn extend_from(&mut self, other: &SymbolSequence) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }
}

impl Deref for SymbolSequence {
    type Target = [Symbol];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Symbol>> for SymbolSequence {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }
}

impl FromIterator<Symbol> for SymbolSequence {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Symbol> for SymbolSequence {
    fn extend<T: IntoIterator<Item = Symbol>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for SymbolSequence {
    type Item = Symbol;
    type IntoIter = std::vec::IntoIter<Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SymbolSequence {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for SymbolSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl FromStr for SymbolSequence {
    type Err = LSystemError;

    fn from_str(s: &str) -> Result<Self> {
        tokenize(s)
    }
}

/// Splits a flat rewrite string into symbols in a single left-to-right pass.
///
/// A symbol is one character optionally followed by `(` + comma-separated parameter text
/// + `)`. The parameter text is not validated. A module whose `)` never arrives, including
/// a `(` as the very last character, fails with [`LSystemError::MalformedInput`], as does
/// a `(` with no identifier in front of it.
pub fn tokenize(input: &str) -> Result<SymbolSequence> {
    let mut symbols = Vec::new();
    let mut pos = 0;
    let malformed = |position: usize| LSystemError::MalformedInput {
        position,
        input: input.to_string(),
    };

    while let Some(id) = input[pos..].chars().next() {
        if id == MODULE_OPEN {
            return Err(malformed(pos));
        }
        let after_id = pos + id.len_utf8();

        if !input[after_id..].starts_with(MODULE_OPEN) {
            symbols.push(Symbol::bare(id));
            pos = after_id;
            continue;
        }

        let body_start = after_id + 1;
        let Some(body_len) = input[body_start..].find(MODULE_CLOSE) else {
            return Err(malformed(pos));
        };

        symbols.push(Symbol::from_param_text(
            id,
            &input[body_start..body_start + body_len],
        ));
        pos = body_start + body_len + 1;
    }

    Ok(SymbolSequence(symbols))
}

/// Chained construction of a [`SymbolSequence`].
///
/// `build` consumes the builder, so every rule invocation starts from a fresh buffer.
#[derive(Clone, Debug, Default)]
pub struct SymbolBuilder {
    symbols: Vec<Symbol>,
}

impl SymbolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, symbol: Symbol) -> Self {
        self.symbols.push(symbol);
        self
    }

    /// Appends a bare symbol. Fails for `(`.
    pub fn symbol(self, id: char) -> Result<Self> {
        Ok(self.push(Symbol::new(id)?))
    }

    /// Appends a module, normalized like [`Symbol::with_params`]. Fails for `(`.
    pub fn module<I, S>(self, id: char, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(self.push(Symbol::with_params(id, params)?))
    }

    /// `F(<distance>)`: draw forward.
    pub fn forward(self, distance: impl Into<String>) -> Self {
        self.push(Symbol::normalized('F', [distance]))
    }

    /// `A(<angle>)`: turn by an arbitrary angle in degrees.
    pub fn turn(self, angle: impl Into<String>) -> Self {
        self.push(Symbol::normalized('A', [angle]))
    }

    /// `0`: leaf placeholder.
    pub fn leaf(self) -> Self {
        self.push(Symbol::bare('0'))
    }

    pub fn turn_left(self) -> Self {
        self.push(Symbol::bare('+'))
    }

    pub fn turn_right(self) -> Self {
        self.push(Symbol::bare('-'))
    }

    pub fn open_branch(self) -> Self {
        self.push(Symbol::bare('['))
    }

    pub fn close_branch(self) -> Self {
        self.push(Symbol::bare(']'))
    }

    pub fn build(self) -> SymbolSequence {
        SymbolSequence(self.symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_bare_symbols_and_modules() {
        let seq = tokenize("F(12)0[+F(5,abc)]").unwrap();
        assert_eq!(seq.len(), 6);
        assert_eq!(seq[0], Symbol::with_params('F', ["12"]).unwrap());
        assert_eq!(seq[1], Symbol::new('0').unwrap());
        assert_eq!(seq[2], Symbol::new('[').unwrap());
        assert_eq!(seq[3], Symbol::new('+').unwrap());
        assert_eq!(seq[4].params(), ["5", "abc"]);
        assert_eq!(seq[5], Symbol::new(']').unwrap());
    }

    #[test]
    fn parameters_are_kept_as_raw_text() {
        let seq = tokenize("A(-120)X( 3 ,x)").unwrap();
        assert_eq!(seq[0].param(0), Some("-120"));
        assert_eq!(seq[1].params(), [" 3 ", "x"]);
        assert_eq!(seq[1].numeric_param(0), Some(3.0));
        assert_eq!(seq[1].numeric_param(1), None);
        assert_eq!(seq[1].numeric_param(2), None);
    }

    #[test]
    fn unterminated_module_is_malformed() {
        let err = tokenize("FF(10").unwrap_err();
        assert_eq!(
            err,
            LSystemError::MalformedInput {
                position: 1,
                input: "FF(10".to_string()
            }
        );
    }

    #[test]
    fn trailing_module_opener_is_malformed() {
        assert!(matches!(
            tokenize("F[+F]F("),
            Err(LSystemError::MalformedInput { position: 5, .. })
        ));
    }

    #[test]
    fn empty_parameter_list_is_a_bare_symbol() {
        let seq = tokenize("F()").unwrap();
        assert_eq!(seq.as_slice(), [Symbol::new('F').unwrap()]);
        assert_eq!(seq.to_string(), "F");
    }

    #[test]
    fn stray_closer_is_a_bare_symbol() {
        let seq = tokenize(")F").unwrap();
        assert_eq!(seq.as_slice(), [Symbol::new(')').unwrap(), Symbol::new('F').unwrap()]);
    }

    #[test]
    fn empty_input_gives_empty_sequence() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn display_matches_serialized_format() {
        let seq = SymbolBuilder::new()
            .forward("19.53")
            .open_branch()
            .turn("-12")
            .leaf()
            .close_branch()
            .module('X', ["1", "b"])
            .unwrap()
            .build();
        assert_eq!(seq.to_string(), "F(19.53)[A(-12)0]X(1,b)");
        assert_eq!(tokenize(&seq.to_string()).unwrap(), seq);
    }

    #[test]
    fn opener_is_not_an_identifier() {
        assert_eq!(
            Symbol::new('('),
            Err(LSystemError::InvalidSymbol { id: '(' })
        );
        assert!(Symbol::with_params('(', ["1"]).is_err());
        assert!(SymbolBuilder::new().symbol('(').is_err());
        assert!(matches!(
            SymbolSequence::from_chars("F("),
            Err(LSystemError::InvalidSymbol { id: '(' })
        ));
        assert!(matches!(
            tokenize("("),
            Err(LSystemError::MalformedInput { position: 0, .. })
        ));
        assert!(matches!(
            tokenize("F(1)(2)"),
            Err(LSystemError::MalformedInput { position: 4, .. })
        ));
    }

    #[test]
    fn params_are_normalized_to_the_serialized_grammar() {
        let split = Symbol::with_params('Y', ["a,b"]).unwrap();
        assert_eq!(split.params(), ["a", "b"]);
        assert!(split.has_params());

        let empty = Symbol::with_params('Q', [""]).unwrap();
        assert!(!empty.has_params());
        assert_eq!(empty.to_string(), "Q");

        let closed = Symbol::with_params('Z', ["1)", "(2"]).unwrap();
        assert_eq!(closed.to_string(), "Z(1,(2)");

        let seq: SymbolSequence = [split, empty, closed].into_iter().collect();
        assert_eq!(tokenize(&seq.to_string()).unwrap(), seq);
    }

    #[test]
    fn builder_normalizes_step_text() {
        let seq = SymbolBuilder::new().forward("3,4").turn("").build();
        assert_eq!(seq.to_string(), "F(3,4)A");
        assert_eq!(tokenize(&seq.to_string()).unwrap(), seq);
    }

    #[test]
    fn from_chars_builds_bare_symbols() {
        let seq = SymbolSequence::from_chars("F+)").unwrap();
        assert_eq!(seq.len(), 3);
        assert!(seq.iter().all(|s| !s.has_params()));
        assert_eq!(seq.to_string(), "F+)");
    }

    #[test]
    fn parses_through_from_str() {
        let seq: SymbolSequence = "F(1)[+X]".parse().unwrap();
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.to_string(), "F(1)[+X]");
        assert!("F(1".parse::<SymbolSequence>().is_err());
    }

    #[test]
    fn deserialization_goes_through_validation() {
        let symbol: Symbol =
            serde_json::from_str(r#"{"id":"X","params":["1,2",""]}"#).unwrap();
        assert_eq!(symbol.params(), ["1", "2", ""]);

        let bare: Symbol = serde_json::from_str(r#"{"id":"F"}"#).unwrap();
        assert_eq!(bare, Symbol::new('F').unwrap());

        assert!(serde_json::from_str::<Symbol>(r#"{"id":"(","params":[]}"#).is_err());
    }
}

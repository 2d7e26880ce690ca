//! Argument tokenizer.
//!
//! Each whitespace-separated argument is tested against a fixed list of
//! matchers in priority order; the first match decides its kind:
//!
//! 1. name immediately followed by a signed delta (`力量+10`)
//! 2. bare signed number (`-20`, `+5`)
//! 3. bare unsigned number (`50`)
//! 4. bias marker (`b`, `2b`, `p`, `3p`), folded into a signed counter
//! 5. anything else is a name
//!
//! Commands interpret the resulting [`Tokens`] with their own local rules.

use std::sync::LazyLock;

use regex::Regex;

static NAME_DELTA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\p{L}+)([+-]\d+)$").expect("valid regex"));
static SIGNED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]\d+(\.\d+)?$").expect("valid regex"));
static UNSIGNED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("valid regex"));
static BIAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d*)([bp])$").expect("valid regex"));
static NAME_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\p{L}+?)(\d+)$").expect("valid regex"));

/// The kinds of argument a matcher can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// `name+delta` / `name-delta`.
    NameDelta,
    /// A number with an explicit sign.
    Signed,
    /// A number without a sign.
    Unsigned,
    /// A bonus (`b`) or penalty (`p`) marker with an optional count.
    Bias,
    /// Fallback: a bare name.
    Name,
}

/// The order in which matchers are tried.
pub const PRIORITY: [Matcher; 5] = [
    Matcher::NameDelta,
    Matcher::Signed,
    Matcher::Unsigned,
    Matcher::Bias,
    Matcher::Name,
];

/// A classified argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// A name with a signed delta attached.
    NameDelta(String, i64),
    /// A bare signed number.
    Signed(f64),
    /// A bare unsigned number.
    Unsigned(f64),
    /// A signed bias contribution.
    Bias(i32),
    /// A bare name.
    Name(String),
}

impl Matcher {
    /// Try this matcher against one argument.
    pub fn try_match(self, raw: &str) -> Option<Classified> {
        match self {
            Self::NameDelta => {
                let caps = NAME_DELTA_RE.captures(raw)?;
                let delta = caps[2].parse::<i64>().ok()?;
                Some(Classified::NameDelta(caps[1].to_string(), delta))
            }
            Self::Signed => SIGNED_RE
                .is_match(raw)
                .then(|| raw.parse::<f64>().ok())
                .flatten()
                .map(Classified::Signed),
            Self::Unsigned => UNSIGNED_RE
                .is_match(raw)
                .then(|| raw.parse::<f64>().ok())
                .flatten()
                .map(Classified::Unsigned),
            Self::Bias => {
                let caps = BIAS_RE.captures(raw)?;
                let count = match &caps[1] {
                    "" => 1,
                    digits => digits.parse::<i32>().unwrap_or(i32::MAX),
                };
                let sign = if &caps[2] == "b" { 1 } else { -1 };
                Some(Classified::Bias(sign * count))
            }
            Self::Name => Some(Classified::Name(raw.to_string())),
        }
    }
}

/// Classify one argument using the fixed matcher priority.
pub fn classify(raw: &str) -> Classified {
    PRIORITY
        .iter()
        .find_map(|matcher| matcher.try_match(raw))
        .unwrap_or_else(|| Classified::Name(raw.to_string()))
}

/// A token in command order.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An attribute or skill name.
    Name(String),
    /// A signed delta split off a name.
    Delta(i64),
    /// A bare signed number.
    Signed(f64),
    /// A bare unsigned number.
    Unsigned(f64),
}

/// The tokens of one command line plus the accumulated bias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokens {
    /// Tokens in argument order; bias markers are not included.
    pub items: Vec<Token>,
    /// Sum of all bias markers: positive is bonus, negative is penalty.
    pub bias: i32,
}

impl Tokens {
    /// Tokenize lowercased arguments.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut tokens = Self::default();
        for arg in args {
            match classify(arg.as_ref()) {
                Classified::NameDelta(name, delta) => {
                    tokens.items.push(Token::Name(name));
                    tokens.items.push(Token::Delta(delta));
                }
                Classified::Signed(n) => tokens.items.push(Token::Signed(n)),
                Classified::Unsigned(n) => tokens.items.push(Token::Unsigned(n)),
                Classified::Bias(n) => tokens.bias = tokens.bias.saturating_add(n),
                Classified::Name(name) => tokens.items.push(Token::Name(name)),
            }
        }
        tokens
    }

    /// The names in argument order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|t| match t {
            Token::Name(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// The sum of every delta and signed number.
    pub fn modifier(&self) -> i64 {
        self.items
            .iter()
            .map(|t| match t {
                Token::Delta(n) => *n,
                Token::Signed(n) => n.trunc() as i64,
                _ => 0,
            })
            .sum()
    }
}

/// Split a name with digits glued to its end (`侦查50`) into the name and
/// the number.
pub fn split_trailing_number(name: &str) -> Option<(String, i64)> {
    let caps = NAME_NUMBER_RE.captures(name)?;
    let value = caps[2].parse::<i64>().ok()?;
    Some((caps[1].to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_priority() {
        assert_eq!(
            classify("力量+10"),
            Classified::NameDelta("力量".to_string(), 10)
        );
        assert_eq!(classify("str-5"), Classified::NameDelta("str".to_string(), -5));
        assert_eq!(classify("-20"), Classified::Signed(-20.0));
        assert_eq!(classify("+1.5"), Classified::Signed(1.5));
        assert_eq!(classify("50"), Classified::Unsigned(50.0));
        assert_eq!(classify("b"), Classified::Bias(1));
        assert_eq!(classify("2b"), Classified::Bias(2));
        assert_eq!(classify("3p"), Classified::Bias(-3));
        assert_eq!(classify("侦查"), Classified::Name("侦查".to_string()));
    }

    #[test]
    fn single_letters_other_than_markers_are_names() {
        assert_eq!(classify("h"), Classified::Name("h".to_string()));
        // a lone "b" is a bias marker, never a name
        assert_eq!(classify("b"), Classified::Bias(1));
    }

    #[test]
    fn name_delta_needs_letters_only() {
        assert_eq!(classify("a1+2"), Classified::Name("a1+2".to_string()));
        assert_eq!(classify("+"), Classified::Name("+".to_string()));
    }

    #[test]
    fn bias_accumulates_across_markers() {
        let tokens = Tokens::parse(&["侦查", "b", "2b", "p"]);
        assert_eq!(tokens.bias, 2);
        assert_eq!(tokens.items, vec![Token::Name("侦查".to_string())]);
    }

    #[test]
    fn name_delta_emits_two_tokens() {
        let tokens = Tokens::parse(&["力量+10", "2"]);
        assert_eq!(
            tokens.items,
            vec![
                Token::Name("力量".to_string()),
                Token::Delta(10),
                Token::Unsigned(2.0),
            ]
        );
        assert_eq!(tokens.modifier(), 10);
        assert_eq!(tokens.names().collect::<Vec<_>>(), vec!["力量"]);
    }

    #[test]
    fn modifiers_sum() {
        let tokens = Tokens::parse(&["侦查", "-20", "+5"]);
        assert_eq!(tokens.modifier(), -15);
    }

    #[test]
    fn trailing_number_split() {
        assert_eq!(
            split_trailing_number("侦查50"),
            Some(("侦查".to_string(), 50))
        );
        assert_eq!(split_trailing_number("侦查"), None);
        assert_eq!(split_trailing_number("50"), None);
    }

    #[test]
    fn matcher_order_is_fixed() {
        assert_eq!(PRIORITY[0], Matcher::NameDelta);
        assert_eq!(PRIORITY[4], Matcher::Name);
        // "5b" is not a number, so it falls through to the bias matcher
        assert_eq!(Matcher::Unsigned.try_match("5b"), None);
        assert_eq!(classify("5b"), Classified::Bias(5));
    }
}

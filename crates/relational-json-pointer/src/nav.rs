//! Relative navigation prefixes: `2`, `0+1`, `1-2#`, ...

use std::fmt;

/// One token of a relative navigation prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavToken {
    /// A run of ASCII digits. Kept as text; callers parse it with the bound
    /// that applies to them (ascend count, array index, shift amount).
    Number(String),
    Plus,
    Minus,
    /// `#`: request the key of the current location instead of its value.
    Key,
}

impl NavToken {
    pub fn as_str(&self) -> &str {
        match self {
            NavToken::Number(digits) => digits,
            NavToken::Plus => "+",
            NavToken::Minus => "-",
            NavToken::Key => "#",
        }
    }
}

impl fmt::Display for NavToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn nav_segment_regex() -> &'static regex::Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"^[0-9+#-]+$").expect("valid nav segment regex"))
}

fn nav_token_regex() -> &'static regex::Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"[0-9]+|-|\+|#").expect("valid nav token regex"))
}

/// Splits a segment into navigation tokens.
///
/// Returns `None` when the segment is not made purely of digit runs and the
/// symbols `+`, `-`, `#`.
///
/// ```
/// use relational_json_pointer::{parse_nav_tokens, NavToken};
///
/// assert_eq!(
///     parse_nav_tokens("2-1"),
///     Some(vec![
///         NavToken::Number("2".into()),
///         NavToken::Minus,
///         NavToken::Number("1".into()),
///     ])
/// );
/// assert_eq!(parse_nav_tokens("foo"), None);
/// ```
pub fn parse_nav_tokens(segment: &str) -> Option<Vec<NavToken>> {
    if !nav_segment_regex().is_match(segment) {
        return None;
    }
    let tokens = nav_token_regex()
        .find_iter(segment)
        .map(|m| match m.as_str() {
            "+" => NavToken::Plus,
            "-" => NavToken::Minus,
            "#" => NavToken::Key,
            digits => NavToken::Number(digits.to_string()),
        })
        .collect();
    Some(tokens)
}

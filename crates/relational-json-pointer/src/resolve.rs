//! Walks a chain of absolute or relative pointers through a document.
//!
//! The first segment of every pointer either resets to the root (`""` or
//! `#`) or navigates relative to where the chain currently stands: a digit
//! run ascends that many levels, `+N`/`-N` moves to a sibling array element
//! and a trailing `#` yields the key of the location instead of its value.
//! Remaining segments descend as in RFC 6901. Objects carrying a string
//! `$ref` are followed transparently, relative to the current history.

use std::borrow::Cow;

use serde_json::Value;
use tracing::trace;

use crate::error::{RelationalPointerError, Result};
use crate::frame::{Frame, History, END_KEY, ROOT_KEY};
use crate::nav::{parse_nav_tokens, NavToken};
use crate::tokenize::tokenize;

/// Default bound on nested `$ref` hops.
pub const DEFAULT_MAX_INDIRECTION_DEPTH: usize = 32;

const REF_KEY: &str = "$ref";

/// One pointer, or several applied in succession.
pub trait PointerChain {
    fn pointers(&self) -> Vec<&str>;
}

impl PointerChain for str {
    fn pointers(&self) -> Vec<&str> {
        vec![self]
    }
}

impl PointerChain for String {
    fn pointers(&self) -> Vec<&str> {
        vec![self.as_str()]
    }
}

impl<S: AsRef<str>> PointerChain for [S] {
    fn pointers(&self) -> Vec<&str> {
        self.iter().map(|pointer| pointer.as_ref()).collect()
    }
}

impl<S: AsRef<str>> PointerChain for Vec<S> {
    fn pointers(&self) -> Vec<&str> {
        self.as_slice().pointers()
    }
}

impl<S: AsRef<str>, const N: usize> PointerChain for [S; N] {
    fn pointers(&self) -> Vec<&str> {
        self.as_slice().pointers()
    }
}

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference<'a> {
    /// A location in the document, with the frames walked to reach it.
    Location(History<'a>),
    /// A trailing `#` asked for the key of this frame.
    Key(Frame<'a>),
}

impl<'a> Reference<'a> {
    /// Value at the location, or the requested key as a JSON string.
    pub fn value(&self) -> Option<Cow<'a, Value>> {
        match self {
            Reference::Location(history) => history.current().value.map(Cow::Borrowed),
            Reference::Key(frame) => Some(Cow::Owned(Value::String(frame.key.clone()))),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Reference::Location(history) => &history.current().key,
            Reference::Key(_) => ROOT_KEY,
        }
    }

    /// The frame resolution ended on. For a key request this is the frame
    /// whose key was asked for.
    pub fn target(&self) -> &Frame<'a> {
        match self {
            Reference::Location(history) => history.current(),
            Reference::Key(frame) => frame,
        }
    }

    pub fn parent(&self) -> Option<&Frame<'a>> {
        match self {
            Reference::Location(history) => history.parent(),
            Reference::Key(frame) => Some(frame),
        }
    }

    pub fn history(&self) -> Option<&History<'a>> {
        match self {
            Reference::Location(history) => Some(history),
            Reference::Key(_) => None,
        }
    }

    pub fn absolute_path(&self) -> String {
        match self {
            Reference::Location(history) => history.current().absolute_path(),
            Reference::Key(_) => ROOT_KEY.to_string(),
        }
    }

    /// True for the `-` marker past the end of an array.
    pub fn is_dangling_end(&self) -> bool {
        match self {
            Reference::Location(history) => {
                history.current().key == END_KEY
                    && history.current().value.is_none()
                    && matches!(history.parent().and_then(|f| f.value), Some(Value::Array(_)))
            }
            Reference::Key(_) => false,
        }
    }
}

/// Position in the chain, for error reporting.
struct Cursor<'p> {
    index: usize,
    pointer: &'p str,
}

impl Cursor<'_> {
    fn relative_usage(&self, reason: &'static str) -> RelationalPointerError {
        RelationalPointerError::InvalidRelativeUsage {
            index: self.index,
            pointer: self.pointer.to_string(),
            reason,
        }
    }

    fn out_of_bounds(&self, position: String, len: usize) -> RelationalPointerError {
        RelationalPointerError::IndexOutOfBounds {
            index: self.index,
            pointer: self.pointer.to_string(),
            position,
            len,
        }
    }

    fn invalid_array_index(&self, segment: &str) -> RelationalPointerError {
        RelationalPointerError::InvalidArrayIndex {
            index: self.index,
            pointer: self.pointer.to_string(),
            segment: segment.to_string(),
        }
    }
}

/// Resolution settings.
///
/// ```
/// use relational_json_pointer::{Resolver, RelationalPointerError};
/// use serde_json::json;
///
/// let doc = json!({"a": {"$ref": "#/a"}});
/// let resolver = Resolver::new().with_max_indirection_depth(4);
/// assert!(matches!(
///     resolver.get("/a", &doc),
///     Err(RelationalPointerError::IndirectionCycle { limit: 4, .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    max_indirection_depth: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver {
            max_indirection_depth: DEFAULT_MAX_INDIRECTION_DEPTH,
        }
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of nested `$ref` hops before failing with
    /// [`RelationalPointerError::IndirectionCycle`].
    pub fn with_max_indirection_depth(mut self, depth: usize) -> Self {
        self.max_indirection_depth = depth;
        self
    }

    pub fn max_indirection_depth(&self) -> usize {
        self.max_indirection_depth
    }

    /// Resolves a pointer chain, starting from `history` when given and from
    /// a fresh root frame otherwise.
    pub fn resolve<'a, P: PointerChain + ?Sized>(
        &self,
        pointers: &P,
        doc: &'a Value,
        history: Option<History<'a>>,
    ) -> Result<Reference<'a>> {
        let history = history.unwrap_or_else(|| History::new(doc));
        self.resolve_chain(&pointers.pointers(), doc, history, 0)
    }

    fn resolve_chain<'a>(
        &self,
        pointers: &[&str],
        doc: &'a Value,
        mut history: History<'a>,
        nesting: usize,
    ) -> Result<Reference<'a>> {
        let last_pointer = pointers.len().saturating_sub(1);
        for (index, pointer) in pointers.iter().copied().enumerate() {
            let at = Cursor { index, pointer };
            let segments = tokenize(pointer);
            for (position, segment) in segments.iter().enumerate() {
                if position > 0 {
                    self.descend(&at, segment, doc, &mut history, nesting)?;
                    continue;
                }
                if segment.is_empty() || segment == ROOT_KEY {
                    history.reset();
                    continue;
                }
                let ends_chain = index == last_pointer && segments.len() == 1;
                if let Some(key) = self.navigate(&at, segment, &mut history, ends_chain)? {
                    return Ok(key);
                }
            }
        }
        Ok(Reference::Location(history))
    }

    /// Applies a relative prefix to the history.
    fn navigate<'a>(
        &self,
        at: &Cursor<'_>,
        segment: &str,
        history: &mut History<'a>,
        ends_chain: bool,
    ) -> Result<Option<Reference<'a>>> {
        let tokens =
            parse_nav_tokens(segment).ok_or_else(|| RelationalPointerError::MalformedPointer {
                index: at.index,
                pointer: at.pointer.to_string(),
            })?;

        let mut i = 0;
        while i < tokens.len() {
            match &tokens[i] {
                NavToken::Key => {
                    if i + 1 < tokens.len() {
                        return Err(at.relative_usage("Cannot index into relative key"));
                    }
                    if history.len() == 1 {
                        return Err(at.relative_usage("No relative key for document root"));
                    }
                    if !ends_chain {
                        return Err(at.relative_usage("Nothing may follow a relative key request"));
                    }
                    return Ok(Some(Reference::Key(history.current().clone())));
                }
                NavToken::Number(digits) => {
                    let levels = digits
                        .parse::<usize>()
                        .ok()
                        .filter(|&levels| levels < history.len())
                        .ok_or_else(|| RelationalPointerError::ExceededRoot {
                            index: at.index,
                            pointer: at.pointer.to_string(),
                            levels: digits.clone(),
                            depth: history.depth(),
                        })?;
                    trace!(levels, depth = history.depth(), "ascending relative pointer");
                    history.ascend(levels);
                }
                shift @ (NavToken::Plus | NavToken::Minus) => {
                    let sibling = self.shift(at, shift, tokens.get(i + 1), history)?;
                    history.replace_current(sibling);
                    i += 1;
                }
            }
            i += 1;
        }
        Ok(None)
    }

    /// Builds the frame `amount` positions before or after the current array
    /// element.
    fn shift<'a>(
        &self,
        at: &Cursor<'_>,
        direction: &NavToken,
        amount: Option<&NavToken>,
        history: &History<'a>,
    ) -> Result<Frame<'a>> {
        let not_array = || RelationalPointerError::ParentNotArray {
            index: at.index,
            pointer: at.pointer.to_string(),
        };
        let parent = history.parent().ok_or_else(not_array)?;
        let arr = match parent.value {
            Some(Value::Array(arr)) => arr,
            _ => return Err(not_array()),
        };

        let amount = match amount {
            Some(NavToken::Number(digits)) => digits,
            Some(other) => {
                return Err(RelationalPointerError::NonNumericShift {
                    index: at.index,
                    pointer: at.pointer.to_string(),
                    token: other.to_string(),
                })
            }
            None => {
                return Err(RelationalPointerError::MissingShiftAmount {
                    index: at.index,
                    pointer: at.pointer.to_string(),
                })
            }
        };

        let current = history.current();
        let from = if current.key == END_KEY {
            arr.len()
        } else {
            current
                .key
                .parse::<usize>()
                .map_err(|_| at.invalid_array_index(&current.key))?
        };
        let to = amount
            .parse::<usize>()
            .ok()
            .and_then(|n| match direction {
                NavToken::Plus => from.checked_add(n),
                _ => from.checked_sub(n),
            })
            .filter(|&to| to < arr.len())
            .ok_or_else(|| at.out_of_bounds(format!("{from}{direction}{amount}"), arr.len()))?;

        trace!(from, to, "shifting within array");
        Ok(parent.child(to.to_string(), arr.get(to)))
    }

    /// Descends one ordinary segment from the current frame.
    fn descend<'a>(
        &self,
        at: &Cursor<'_>,
        segment: &str,
        doc: &'a Value,
        history: &mut History<'a>,
        nesting: usize,
    ) -> Result<()> {
        let current = history.current();
        let frame = match current.value {
            Some(Value::Array(arr)) => match parse_nav_tokens(segment).as_deref() {
                Some([NavToken::Minus]) => current.child(END_KEY.to_string(), None),
                Some([NavToken::Number(digits)]) => {
                    let idx = digits
                        .parse::<usize>()
                        .ok()
                        .filter(|&idx| idx < arr.len())
                        .ok_or_else(|| at.out_of_bounds(digits.clone(), arr.len()))?;
                    current.child(idx.to_string(), arr.get(idx))
                }
                _ => return Err(at.invalid_array_index(segment)),
            },
            Some(Value::Object(map)) => {
                let found = map.get(segment);
                match found.and_then(indirection_target) {
                    Some(target) => self.follow(at, segment, target, doc, history, nesting)?,
                    None => current.child(segment.to_string(), found),
                }
            }
            _ => {
                return Err(RelationalPointerError::IndexIntoNonObject {
                    index: at.index,
                    pointer: at.pointer.to_string(),
                    segment: segment.to_string(),
                })
            }
        };
        history.push(frame);
        Ok(())
    }

    /// Resolves a `$ref` found under `segment` and relabels the result with
    /// the segment name.
    fn follow<'a>(
        &self,
        at: &Cursor<'_>,
        segment: &str,
        target: &str,
        doc: &'a Value,
        history: &History<'a>,
        nesting: usize,
    ) -> Result<Frame<'a>> {
        if nesting >= self.max_indirection_depth {
            return Err(RelationalPointerError::IndirectionCycle {
                index: at.index,
                pointer: at.pointer.to_string(),
                limit: self.max_indirection_depth,
            });
        }
        trace!(segment, target, nesting, "following $ref");
        match self.resolve_chain(&[target], doc, history.clone(), nesting + 1)? {
            Reference::Location(resolved) => Ok(resolved.into_current().relabel(segment)),
            Reference::Key(_) => Err(Cursor {
                index: 0,
                pointer: target,
            }
            .relative_usage("A $ref cannot target a relative key")),
        }
    }
}

/// The `$ref` string of an indirection object. Arrays never qualify.
fn indirection_target(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) => map
            .get(REF_KEY)
            .and_then(Value::as_str)
            .filter(|target| !target.is_empty()),
        _ => None,
    }
}

/// Resolves a pointer chain from the document root.
///
/// ```
/// use relational_json_pointer::resolve;
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": [1, 2, 3]}});
/// let reference = resolve(&["/a/b/1", "0+1"], &doc).unwrap();
/// assert_eq!(reference.absolute_path(), "/a/b/2");
/// assert_eq!(reference.value().as_deref(), Some(&json!(3)));
/// ```
pub fn resolve<'a, P: PointerChain + ?Sized>(pointers: &P, doc: &'a Value) -> Result<Reference<'a>> {
    Resolver::default().resolve(pointers, doc, None)
}

/// Resolves a pointer chain continuing from an existing history.
pub fn resolve_with_history<'a, P: PointerChain + ?Sized>(
    pointers: &P,
    doc: &'a Value,
    history: History<'a>,
) -> Result<Reference<'a>> {
    Resolver::default().resolve(pointers, doc, Some(history))
}

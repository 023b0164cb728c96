//! Reading and writing values through a resolved pointer chain.

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use crate::error::{RelationalPointerError, Result};
use crate::frame::{lookup_mut, Step, Trail, END_KEY};
use crate::resolve::{PointerChain, Reference, Resolver};

/// Result of a write: where it landed and what it displaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Written {
    /// Location that was written, detached from the document.
    pub step: Step,
    /// Value previously held at the location. `None` for appends and for
    /// previously absent object keys.
    pub previous: Option<Value>,
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Resolver {
    /// Reads the value a pointer chain refers to.
    ///
    /// `Ok(None)` means the location is valid but holds nothing (an absent
    /// object key). The `-` array marker is never readable.
    pub fn get<'a, P: PointerChain + ?Sized>(
        &self,
        pointers: &P,
        doc: &'a Value,
    ) -> Result<Option<Cow<'a, Value>>> {
        let reference = self.resolve(pointers, doc, None)?;
        if reference.is_dangling_end() {
            return Err(RelationalPointerError::DanglingArrayEnd {
                path: reference.absolute_path(),
            });
        }
        Ok(reference.value())
    }

    /// Writes `value` at the location a pointer chain refers to.
    ///
    /// The write goes to the parent of the resolved frame: `-` under an
    /// array appends, an index replaces, an object key is inserted or
    /// replaced. A location reached through `$ref` is written at the
    /// indirection site.
    pub fn set_with_frame<P: PointerChain + ?Sized>(
        &self,
        value: Value,
        pointers: &P,
        doc: &mut Value,
        trail: Option<&Trail>,
    ) -> Result<Written> {
        let (step, parent_location) = {
            let doc: &Value = doc;
            let history = trail.map(|trail| trail.attach(doc));
            match self.resolve(pointers, doc, history)? {
                Reference::Location(history) => {
                    let parent = history.parent().ok_or(RelationalPointerError::CannotSetRoot)?;
                    (history.current().step(), parent.location().to_vec())
                }
                Reference::Key(frame) => {
                    return Err(RelationalPointerError::CannotSetProperty {
                        key: frame.key,
                        parent: frame.value.map_or("undefined", kind),
                    })
                }
            }
        };

        let cannot_set = |parent: &'static str| RelationalPointerError::CannotSetProperty {
            key: step.key.clone(),
            parent,
        };
        let parent = lookup_mut(doc, &parent_location).ok_or_else(|| cannot_set("undefined"))?;
        let previous = match parent {
            Value::Array(arr) if step.key == END_KEY => {
                arr.push(value);
                None
            }
            Value::Array(arr) => {
                let idx = step
                    .key
                    .parse::<usize>()
                    .map_err(|_| cannot_set("array"))?;
                let slot = arr.get_mut(idx).ok_or_else(|| cannot_set("array"))?;
                Some(std::mem::replace(slot, value))
            }
            Value::Object(map) => map.insert(step.key.clone(), value),
            other => return Err(cannot_set(kind(other))),
        };

        debug!(path = %step.absolute_path(), key = %step.key, "wrote through pointer");
        Ok(Written { step, previous })
    }

    /// Writes `value` and returns what the location held before.
    pub fn set<P: PointerChain + ?Sized>(
        &self,
        value: Value,
        pointers: &P,
        doc: &mut Value,
    ) -> Result<Option<Value>> {
        self.set_with_frame(value, pointers, doc, None)
            .map(|written| written.previous)
    }
}

/// Reads the value a pointer chain refers to.
///
/// ```
/// use relational_json_pointer::get;
/// use serde_json::json;
///
/// let doc = json!({"a": {"$ref": "#/b"}, "b": [10, 20]});
/// assert_eq!(get("/a/1", &doc).unwrap().as_deref(), Some(&json!(20)));
/// assert_eq!(get(&["/b/1", "0#"], &doc).unwrap().as_deref(), Some(&json!("1")));
/// assert!(get("/b/-", &doc).is_err());
/// ```
pub fn get<'a, P: PointerChain + ?Sized>(
    pointers: &P,
    doc: &'a Value,
) -> Result<Option<Cow<'a, Value>>> {
    Resolver::default().get(pointers, doc)
}

/// Writes `value`, optionally continuing from a previously recorded trail.
pub fn set_with_frame<P: PointerChain + ?Sized>(
    value: Value,
    pointers: &P,
    doc: &mut Value,
    trail: Option<&Trail>,
) -> Result<Written> {
    Resolver::default().set_with_frame(value, pointers, doc, trail)
}

/// Writes `value` and returns what the location held before.
///
/// ```
/// use relational_json_pointer::set;
/// use serde_json::json;
///
/// let mut doc = json!({"arr": [1, 2]});
/// set(json!(3), "/arr/-", &mut doc).unwrap();
/// assert_eq!(doc, json!({"arr": [1, 2, 3]}));
/// ```
pub fn set<P: PointerChain + ?Sized>(
    value: Value,
    pointers: &P,
    doc: &mut Value,
) -> Result<Option<Value>> {
    Resolver::default().set(value, pointers, doc)
}

//! Reference frames and the traversal history they form.

use serde_json::Value;

use crate::tokenize::format_path;

/// Key of the document root frame.
pub const ROOT_KEY: &str = "#";

/// Key denoting the position one past the last element of an array.
pub const END_KEY: &str = "-";

/// One step of traversal.
///
/// `value` is `None` when nothing exists at the location (absent key or the
/// past-the-end marker); an explicit JSON `null` is `Some(&Value::Null)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub value: Option<&'a Value>,
    /// Key, array index or sentinel used to reach this frame.
    pub key: String,
    location: Vec<String>,
}

impl<'a> Frame<'a> {
    pub fn root(doc: &'a Value) -> Self {
        Frame {
            value: Some(doc),
            key: ROOT_KEY.to_string(),
            location: Vec::new(),
        }
    }

    pub(crate) fn child(&self, key: String, value: Option<&'a Value>) -> Self {
        let mut location = Vec::with_capacity(self.location.len() + 1);
        location.extend_from_slice(&self.location);
        location.push(key.clone());
        Frame {
            value,
            key,
            location,
        }
    }

    /// Relabels a frame reached through `$ref` with the key of the
    /// indirection site. The location keeps pointing at the target.
    pub(crate) fn relabel(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    /// Unescaped segments from the document root to the value of this frame.
    pub fn location(&self) -> &[String] {
        &self.location
    }

    /// Normalized absolute JSON Pointer of this frame (`""` for the root).
    pub fn absolute_path(&self) -> String {
        format_path(&self.location)
    }

    pub fn is_root(&self) -> bool {
        self.location.is_empty() && self.key == ROOT_KEY
    }

    /// Detaches the frame from the document it borrows.
    pub fn step(&self) -> Step {
        Step {
            key: self.key.clone(),
            location: self.location.clone(),
        }
    }
}

/// Frames recorded while resolving a pointer chain, root first.
///
/// The parent of frame `i` is frame `i - 1`; ascending truncates the
/// sequence. A history is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct History<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> History<'a> {
    pub fn new(doc: &'a Value) -> Self {
        History {
            frames: vec![Frame::root(doc)],
        }
    }

    pub fn root(&self) -> &Frame<'a> {
        &self.frames[0]
    }

    pub fn current(&self) -> &Frame<'a> {
        &self.frames[self.frames.len() - 1]
    }

    /// Frame the current one was reached from. `None` at the root.
    pub fn parent(&self) -> Option<&Frame<'a>> {
        self.parent_of(self.frames.len() - 1)
    }

    pub fn parent_of(&self, index: usize) -> Option<&Frame<'a>> {
        index.checked_sub(1).and_then(|i| self.frames.get(i))
    }

    pub fn frames(&self) -> &[Frame<'a>] {
        &self.frames
    }

    /// Number of frames, root included.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of descents from the root to the current frame.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub(crate) fn reset(&mut self) {
        self.frames.truncate(1);
    }

    /// Drops the `levels` most recent frames. Callers keep `levels < len()`.
    pub(crate) fn ascend(&mut self, levels: usize) {
        let keep = self.frames.len().saturating_sub(levels).max(1);
        self.frames.truncate(keep);
    }

    pub(crate) fn push(&mut self, frame: Frame<'a>) {
        self.frames.push(frame);
    }

    /// Swaps the current frame for a sibling under the same parent. Callers
    /// only shift below the root. The parent frame stays, so ascending one
    /// level after a shift lands on the array.
    pub(crate) fn replace_current(&mut self, frame: Frame<'a>) {
        debug_assert!(self.frames.len() > 1);
        let last = self.frames.len() - 1;
        self.frames[last] = frame;
    }

    pub fn into_current(mut self) -> Frame<'a> {
        let last = self.frames.len() - 1;
        self.frames.swap_remove(last)
    }

    pub fn trail(&self) -> Trail {
        Trail {
            steps: self.frames.iter().map(Frame::step).collect(),
        }
    }
}

/// A frame without its borrowed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub key: String,
    pub location: Vec<String>,
}

impl Step {
    pub fn absolute_path(&self) -> String {
        format_path(&self.location)
    }
}

/// Owned form of a [`History`], usable where the document is borrowed
/// mutably. [`Trail::attach`] re-reads the values by location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trail {
    steps: Vec<Step>,
}

impl Trail {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn attach<'a>(&self, doc: &'a Value) -> History<'a> {
        let mut history = History::new(doc);
        for step in self.steps.iter().skip(1) {
            history.push(Frame {
                value: lookup(doc, &step.location),
                key: step.key.clone(),
                location: step.location.clone(),
            });
        }
        history
    }
}

/// Reads the value at a location. The past-the-end marker reads as `None`.
pub(crate) fn lookup<'a>(doc: &'a Value, location: &[String]) -> Option<&'a Value> {
    let mut current = doc;
    for step in location {
        current = match current {
            Value::Array(arr) => arr.get(step.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(step)?,
            _ => return None,
        };
    }
    Some(current)
}

pub(crate) fn lookup_mut<'a>(doc: &'a mut Value, location: &[String]) -> Option<&'a mut Value> {
    let mut current = doc;
    for step in location {
        current = match current {
            Value::Array(arr) => arr.get_mut(step.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get_mut(step)?,
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_frame() {
        let doc = json!({"a": 1});
        let history = History::new(&doc);
        assert_eq!(history.len(), 1);
        assert_eq!(history.depth(), 0);
        assert!(history.current().is_root());
        assert_eq!(history.current().key, "#");
        assert_eq!(history.current().absolute_path(), "");
        assert!(history.parent().is_none());
    }

    #[test]
    fn test_parent_is_previous_frame() {
        let doc = json!({"a": {"b/c": [1, 2]}});
        let mut history = History::new(&doc);
        let a = history.current().child("a".into(), doc.get("a"));
        history.push(a);
        let bc = history.current().child("b/c".into(), doc["a"].get("b/c"));
        history.push(bc);

        assert_eq!(history.current().absolute_path(), "/a/b~1c");
        assert_eq!(history.parent().map(|f| f.key.as_str()), Some("a"));

        history.ascend(1);
        assert_eq!(history.current().key, "a");
        assert_eq!(history.parent().map(|f| f.key.as_str()), Some("#"));
    }

    #[test]
    fn test_ascend_never_drops_root() {
        let doc = json!({"a": 1});
        let mut history = History::new(&doc);
        history.push(history.current().child("a".into(), doc.get("a")));
        history.ascend(5);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_trail_attach_round_trip() {
        let doc = json!({"arr": [10, 20]});
        let mut history = History::new(&doc);
        history.push(history.current().child("arr".into(), doc.get("arr")));
        history.push(history.current().child("1".into(), doc["arr"].get(1)));
        history.push(history.root().child("-".into(), None));

        let trail = history.trail();
        assert_eq!(trail.steps().len(), 4);
        assert_eq!(trail.steps()[2].absolute_path(), "/arr/1");

        let attached = trail.attach(&doc);
        assert_eq!(attached.frames()[2].value, Some(&json!(20)));
        assert_eq!(attached.current().value, None);
    }

    #[test]
    fn test_lookup() {
        let doc = json!({"a": [{"b": null}]});
        fn path(steps: &[&str]) -> Vec<String> {
            steps.iter().map(|s| s.to_string()).collect()
        }
        assert_eq!(lookup(&doc, &path(&["a", "0", "b"])), Some(&Value::Null));
        assert_eq!(lookup(&doc, &path(&["a", "-"])), None);
        assert_eq!(lookup(&doc, &path(&["a", "1"])), None);
        assert_eq!(lookup(&doc, &path(&["x", "y"])), None);
    }

    #[test]
    fn test_lookup_mut() {
        let mut doc = json!({"a": [1, 2]});
        if let Some(slot) = lookup_mut(&mut doc, &["a".to_string(), "1".to_string()]) {
            *slot = json!(3);
        }
        assert_eq!(doc, json!({"a": [1, 3]}));
    }
}

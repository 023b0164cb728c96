//! Splitting pointer strings into segments, and the reverse.

/// Unescapes a JSON Pointer path component.
///
/// `~1` is replaced before `~0`, so `~01` yields `~1` and never `/`.
///
/// ```
/// use relational_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("~2"), "~2");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Percent-decodes a segment, passing it through unchanged when the decoded
/// bytes are not valid UTF-8.
pub fn decode_component(component: &str) -> String {
    if !component.contains('%') {
        return component.to_string();
    }
    match urlencoding::decode(component) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => component.to_string(),
    }
}

/// Splits a pointer on `/`, unescaping and percent-decoding every segment.
///
/// The leading segment is kept (empty for absolute pointers) since it carries
/// the root or relative prefix. Never fails.
///
/// ```
/// use relational_json_pointer::tokenize;
///
/// assert_eq!(tokenize("/foo/a~1b"), vec!["", "foo", "a/b"]);
/// assert_eq!(tokenize("1/0"), vec!["1", "0"]);
/// assert_eq!(tokenize(""), vec![""]);
/// ```
pub fn tokenize(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .map(|segment| decode_component(&unescape_component(segment)))
        .collect()
}

/// Formats location segments into an absolute JSON Pointer.
///
/// The root location (no segments) formats to the empty string.
pub fn format_path(path: &[String]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

//! JSON Pointer (RFC 6901) and Relative JSON Pointer resolution.
//!
//! Pointers may be chained: the first one starts at the document root and
//! every following one may continue relative to where the previous one ended.
//! Objects of the form `{"$ref": "<pointer>"}` met along the way are followed
//! as if the target were spliced in at that point.
//!
//! # Example
//!
//! ```
//! use relational_json_pointer::{get, set};
//! use serde_json::json;
//!
//! let mut doc = json!({
//!     "people": [{"name": "ada"}, {"name": "grace"}],
//!     "first": {"$ref": "#/people/0"}
//! });
//!
//! // Absolute pointer through an indirection
//! assert_eq!(get("/first/name", &doc).unwrap().as_deref(), Some(&json!("ada")));
//!
//! // Relative pointer: up one level, next array element, then descend
//! let next = get(&["/people/0/name", "1+1/name"], &doc).unwrap();
//! assert_eq!(next.as_deref(), Some(&json!("grace")));
//!
//! // Key of the current location
//! let index = get(&["/people/1", "0#"], &doc).unwrap();
//! assert_eq!(index.as_deref(), Some(&json!("1")));
//!
//! set(json!({"name": "alan"}), "/people/-", &mut doc).unwrap();
//! assert_eq!(get("/people/2/name", &doc).unwrap().as_deref(), Some(&json!("alan")));
//! ```

pub mod access;
pub mod error;
pub mod frame;
pub mod nav;
pub mod resolve;
pub mod tokenize;

pub use access::{get, set, set_with_frame, Written};
pub use error::{RelationalPointerError, Result};
pub use frame::{Frame, History, Step, Trail, END_KEY, ROOT_KEY};
pub use nav::{parse_nav_tokens, NavToken};
pub use resolve::{
    resolve, resolve_with_history, PointerChain, Reference, Resolver,
    DEFAULT_MAX_INDIRECTION_DEPTH,
};
pub use tokenize::{decode_component, escape_component, format_path, tokenize, unescape_component};

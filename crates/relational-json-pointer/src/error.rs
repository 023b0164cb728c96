//! Errors raised while resolving, reading or writing through a pointer chain.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelationalPointerError {
    /// The first segment is neither empty, `#`, nor a relative prefix.
    #[error("JSON Pointer invalid. Pointer {index}. {pointer}")]
    MalformedPointer { index: usize, pointer: String },

    /// A `#` key request appears where something else follows it, or at the root.
    #[error("Invalid relative JSON Pointer. {reason}. Pointer {index}. {pointer}")]
    InvalidRelativeUsage {
        index: usize,
        pointer: String,
        reason: &'static str,
    },

    /// Ascending more levels than the traversal history holds.
    #[error("Invalid relative JSON Pointer. Exceeded top of parent tree by ascending {levels} from depth {depth}. Pointer {index}. {pointer}")]
    ExceededRoot {
        index: usize,
        pointer: String,
        levels: String,
        depth: usize,
    },

    #[error("Invalid relative JSON Pointer. Parent is not an array. Pointer {index}. {pointer}")]
    ParentNotArray { index: usize, pointer: String },

    #[error("Invalid relative JSON Pointer. No amount of index shift provided in relative navigation. Pointer {index}. {pointer}")]
    MissingShiftAmount { index: usize, pointer: String },

    #[error("Invalid relative JSON Pointer. Index shift must be numeric, got `{token}`. Pointer {index}. {pointer}")]
    NonNumericShift {
        index: usize,
        pointer: String,
        token: String,
    },

    /// `position` is textual so that negative and overflowing results can be reported.
    #[error("Invalid JSON Pointer. Index {position} exceeds array bounds (length {len}). Pointer {index}. {pointer}")]
    IndexOutOfBounds {
        index: usize,
        pointer: String,
        position: String,
        len: usize,
    },

    #[error("Invalid JSON Pointer. Arrays must be indexed by numeric indices, got `{segment}`. Pointer {index}. {pointer}")]
    InvalidArrayIndex {
        index: usize,
        pointer: String,
        segment: String,
    },

    #[error("Invalid JSON Pointer. Attempt to index non-object with `{segment}`. Pointer {index}. {pointer}")]
    IndexIntoNonObject {
        index: usize,
        pointer: String,
        segment: String,
    },

    /// Reading the past-the-end marker of an array. Only writes may target it.
    #[error("Invalid JSON Pointer. {path} refers past the end of its array")]
    DanglingArrayEnd { path: String },

    #[error("Invalid JSON Pointer for SET. Cannot set root document")]
    CannotSetRoot,

    #[error("Invalid JSON Pointer for SET. Cannot set property {key} of {parent}")]
    CannotSetProperty { key: String, parent: &'static str },

    /// `$ref` indirection nested deeper than the resolver allows.
    #[error("JSON Pointer indirection deeper than {limit} levels, likely a $ref cycle. Pointer {index}. {pointer}")]
    IndirectionCycle {
        index: usize,
        pointer: String,
        limit: usize,
    },
}

pub type Result<T, E = RelationalPointerError> = std::result::Result<T, E>;

//! Safe nested property reads over JSON values.
//!
//! A path is either a list of keys or a dotted/bracketed string such as
//! `"a[0].b.c"`. Reads never panic: a missing property, a `null` or scalar
//! in the middle of the path, an absent root or an empty path all resolve to
//! `None` (undefined), which [`get_or`] replaces with a fallback.
//!
//! # Example
//!
//! ```
//! use json_joy_json_get::{get, get_or, to_path};
//! use serde_json::json;
//!
//! let doc = json!({"a": [{"b": {"c": 3}}]});
//!
//! // String and key-list paths
//! assert_eq!(get(&doc, "a[0].b.c"), Some(&json!(3)));
//! assert_eq!(get(&doc, ["a", "0", "b", "c"]), Some(&json!(3)));
//!
//! // Fallback for undefined values
//! let fallback = json!("default");
//! assert_eq!(get_or(&json!({}), "a.b.c", &fallback), &fallback);
//! assert_eq!(get_or(&json!(null), "a.b.c", &fallback), &fallback);
//!
//! // Path parsing on its own
//! assert_eq!(to_path("a[0].b.c"), vec!["a", "0", "b", "c"]);
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, PathStep, Reference};

pub mod tag;
pub use tag::{tag_of, Tag};

pub mod key;
pub use key::ToKey;

pub mod path;
pub use path::{string_to_path, to_path, PathLike};

mod get;
pub use get::{get, get_or, get_or_else, is_valid_index, property};

mod find;
pub use find::find;

/// Why [`find`] could not reach a property.
///
/// `depth` is the index of the path step that failed and `key` its key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("empty property path")]
    EmptyPath,
    #[error("cannot read property {key:?} at depth {depth}: value is undefined")]
    Undefined { depth: usize, key: PathStep },
    #[error("cannot read property {key:?} at depth {depth}: {tag} has no properties")]
    NotAContainer {
        depth: usize,
        key: PathStep,
        tag: Tag,
    },
}

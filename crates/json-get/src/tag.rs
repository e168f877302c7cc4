//! Type tags of JSON values.

use std::fmt;

use serde_json::Value;

/// The `[object Xxx]` tag of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Tag {
    /// Returns the tag string, e.g. `"[object Number]"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Null => "[object Null]",
            Tag::Boolean => "[object Boolean]",
            Tag::Number => "[object Number]",
            Tag::String => "[object String]",
            Tag::Array => "[object Array]",
            Tag::Object => "[object Object]",
        }
    }

    /// Values with these tags are always used as a single key when given as
    /// a path, they are never parsed.
    pub fn is_primitive_key(self) -> bool {
        matches!(self, Tag::Null | Tag::Boolean | Tag::Number)
    }

    /// Whether values with this tag can own properties.
    pub fn is_container(self) -> bool {
        matches!(self, Tag::Array | Tag::Object)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the type tag of a value.
///
/// # Example
///
/// ```
/// use json_joy_json_get::{tag_of, Tag};
/// use serde_json::json;
///
/// assert_eq!(tag_of(&json!(null)), Tag::Null);
/// assert_eq!(tag_of(&json!([1, 2])).as_str(), "[object Array]");
/// ```
pub fn tag_of(value: &Value) -> Tag {
    match value {
        Value::Null => Tag::Null,
        Value::Bool(_) => Tag::Boolean,
        Value::Number(_) => Tag::Number,
        Value::String(_) => Tag::String,
        Value::Array(_) => Tag::Array,
        Value::Object(_) => Tag::Object,
    }
}

use std::borrow::Cow;

use serde_json::Value;

use crate::path::PathLike;

/// Check if a string is a canonical array index: decimal digits with no
/// sign and no leading zero (`"0"` itself is fine).
///
/// # Example
///
/// ```
/// use json_joy_json_get::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("1.0"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Read one own property of a value.
///
/// Objects expose their keys and arrays their canonical indices. Other
/// values have no properties.
pub fn property<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(arr) => {
            if !is_valid_index(key) {
                return None;
            }
            arr.get(key.parse::<usize>().ok()?)
        }
        _ => None,
    }
}

pub(crate) fn resolve<'a>(object: Option<&'a Value>, path: &[String]) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    path.iter().try_fold(object?, |current, step| property(current, step))
}

/// Get the value at `path` of `object`.
///
/// Returns `None` (undefined) if any step is missing, if the walk reaches a
/// `null` or a scalar before the path is consumed, if the root is absent, or
/// if the path is empty. An explicit `null` at the end of the path is
/// returned as `Some(&Value::Null)`.
///
/// # Example
///
/// ```
/// use json_joy_json_get::get;
/// use serde_json::json;
///
/// let doc = json!({"a": [{"b": {"c": 3}}]});
/// assert_eq!(get(&doc, "a[0].b.c"), Some(&json!(3)));
/// assert_eq!(get(&doc, ["a", "0", "b", "c"]), Some(&json!(3)));
/// assert_eq!(get(&doc, "a[1].b"), None);
/// assert_eq!(get(&json!(null), "a.b.c"), None);
/// ```
pub fn get<'a, P: PathLike>(object: impl Into<Option<&'a Value>>, path: P) -> Option<&'a Value> {
    let object = object.into();
    let path = path.cast_path(object);
    resolve(object, &path)
}

/// Get the value at `path` of `object`, or `default` when it is undefined.
///
/// # Example
///
/// ```
/// use json_joy_json_get::get_or;
/// use serde_json::json;
///
/// let fallback = json!("default");
/// assert_eq!(get_or(&json!({}), "a.b.c", &fallback), &json!("default"));
/// assert_eq!(get_or(&json!({"a": null}), "a", &fallback), &json!(null));
/// ```
pub fn get_or<'a, P: PathLike>(
    object: impl Into<Option<&'a Value>>,
    path: P,
    default: &'a Value,
) -> &'a Value {
    get(object, path).unwrap_or(default)
}

/// Get the value at `path` of `object`, computing a fallback when it is
/// undefined.
///
/// # Example
///
/// ```
/// use json_joy_json_get::get_or_else;
/// use serde_json::json;
///
/// let doc = json!({"a": 1});
/// assert_eq!(get_or_else(&doc, "a", || json!(0)).into_owned(), json!(1));
/// assert_eq!(get_or_else(&doc, "b", || json!(0)).into_owned(), json!(0));
/// ```
pub fn get_or_else<'a, P, F>(
    object: impl Into<Option<&'a Value>>,
    path: P,
    default: F,
) -> Cow<'a, Value>
where
    P: PathLike,
    F: FnOnce() -> Value,
{
    match get(object, path) {
        Some(value) => Cow::Borrowed(value),
        None => Cow::Owned(default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_object() {
        let doc = json!({"foo": "bar", "": 1});
        assert_eq!(property(&doc, "foo"), Some(&json!("bar")));
        assert_eq!(property(&doc, ""), Some(&json!(1)));
        assert_eq!(property(&doc, "baz"), None);
    }

    #[test]
    fn test_property_array() {
        let doc = json!([10, 20, 30]);
        assert_eq!(property(&doc, "0"), Some(&json!(10)));
        assert_eq!(property(&doc, "2"), Some(&json!(30)));
        assert_eq!(property(&doc, "3"), None);
        assert_eq!(property(&doc, "01"), None);
        assert_eq!(property(&doc, "-1"), None);
        assert_eq!(property(&doc, "-0"), None);
        assert_eq!(property(&doc, "length"), None);
        assert_eq!(property(&doc, "99999999999999999999999"), None);
    }

    #[test]
    fn test_property_scalars() {
        assert_eq!(property(&json!("abc"), "0"), None);
        assert_eq!(property(&json!(12), "0"), None);
        assert_eq!(property(&json!(true), "x"), None);
        assert_eq!(property(&json!(null), "x"), None);
    }

    #[test]
    fn test_is_valid_index() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("10"));
        assert!(!is_valid_index(""));
        assert!(!is_valid_index("00"));
        assert!(!is_valid_index("+1"));
        assert!(!is_valid_index("1e3"));
    }

    #[test]
    fn test_resolve_empty_path_is_undefined() {
        let doc = json!({"a": 1});
        assert_eq!(resolve(Some(&doc), &[]), None);
    }

    #[test]
    fn test_resolve_stops_at_scalar() {
        let doc = json!({"a": 1});
        assert_eq!(resolve(Some(&doc), &["a".to_string(), "b".to_string()]), None);
    }

    #[test]
    fn test_resolve_absent_root() {
        assert_eq!(resolve(None, &["a".to_string()]), None);
    }

    #[test]
    fn test_get_or_else_lazy() {
        let doc = json!({"a": 1});
        let mut called = false;
        let value = get_or_else(&doc, "a", || {
            called = true;
            json!(0)
        });
        assert_eq!(value, Cow::Borrowed(&json!(1)));
        assert!(!called);
    }
}

use serde_json::Value;

use crate::get::property;
use crate::path::PathLike;
use crate::tag::tag_of;
use crate::types::Reference;
use crate::LookupError;

/// Find the property at `path` of `object`, reporting where resolution
/// stopped when it cannot be reached.
///
/// The last container is always returned: a missing final property gives
/// a [`Reference`] with `val: None`. A missing or non-container value
/// before the last step is an error.
///
/// # Errors
///
/// - `LookupError::EmptyPath` - the path has no steps
/// - `LookupError::Undefined` - a step has nothing to read from
/// - `LookupError::NotAContainer` - a step reads from `null` or a scalar
///
/// # Example
///
/// ```
/// use json_joy_json_get::{find, LookupError};
/// use serde_json::json;
///
/// let doc = json!({"a": [{"b": 1}]});
/// let reference = find(&doc, "a[0].b").unwrap();
/// assert_eq!(reference.val, Some(&json!(1)));
/// assert_eq!(reference.key, "b");
///
/// assert!(matches!(find(&doc, "a[0].b.c"), Err(LookupError::NotAContainer { depth: 3, .. })));
/// ```
pub fn find<'a, P: PathLike>(
    object: impl Into<Option<&'a Value>>,
    path: P,
) -> Result<Reference<'a>, LookupError> {
    let object = object.into();
    let path = path.cast_path(object);
    let Some((last, parents)) = path.split_last() else {
        return Err(LookupError::EmptyPath);
    };

    let mut current = object;
    for (depth, step) in parents.iter().enumerate() {
        let container = container_at(current, depth, step)?;
        current = property(container, step);
    }

    let obj = container_at(current, parents.len(), last)?;
    Ok(Reference {
        val: property(obj, last),
        obj,
        key: last.clone(),
    })
}

fn container_at<'a>(
    current: Option<&'a Value>,
    depth: usize,
    step: &str,
) -> Result<&'a Value, LookupError> {
    let Some(value) = current else {
        tracing::debug!(depth, key = step, "property lookup reached undefined");
        return Err(LookupError::Undefined {
            depth,
            key: step.to_string(),
        });
    };
    let tag = tag_of(value);
    if !tag.is_container() {
        tracing::debug!(depth, key = step, %tag, "property lookup reached a non-container");
        return Err(LookupError::NotAContainer {
            depth,
            key: step.to_string(),
            tag,
        });
    }
    Ok(value)
}

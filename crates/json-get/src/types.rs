//! Type definitions for property paths.

use serde_json::Value;

/// A step in a property path: the key of an object property or the decimal
/// index of an array element.
pub type PathStep = String;

/// A property path.
pub type Path = Vec<PathStep>;

/// A resolved property: the value together with the container it was read
/// from and the key used to read it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference<'a> {
    /// The target value. `None` if the container has no such property.
    pub val: Option<&'a Value>,
    /// The object or array containing the target value.
    pub obj: &'a Value,
    /// The key used to access the value.
    pub key: PathStep,
}

impl<'a> Reference<'a> {
    /// Check if this reference points to an array element.
    pub fn is_array_reference(&self) -> bool {
        self.obj.is_array()
    }

    /// Check if this reference points to an object property.
    pub fn is_object_reference(&self) -> bool {
        self.obj.is_object()
    }

    /// Get the numeric index if this is an array reference.
    pub fn index(&self) -> Option<usize> {
        if !self.is_array_reference() {
            return None;
        }
        self.key.parse().ok()
    }
}

//! Property path normalization.
//!
//! A path is either a list of keys, used as-is, or a string. A string that
//! looks like a single key (see [`is_key`]) is one step, anything else is
//! parsed with [`string_to_path`]:
//!
//! ```
//! use json_joy_json_get::{string_to_path, to_path};
//!
//! assert_eq!(string_to_path("a[0].b.c"), vec!["a", "0", "b", "c"]);
//! assert_eq!(string_to_path("a['x.y'][-1]"), vec!["a", "x.y", "-1"]);
//! assert_eq!(to_path("plain_key"), vec!["plain_key"]);
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::get::property;
use crate::key::{value_to_string, ToKey};
use crate::tag::tag_of;
use crate::types::Path;

fn plain_prop_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?-u:\w)*$").unwrap())
}

/// Check if a string consists only of ASCII word characters (`^\w*$`).
///
/// The empty string is a plain property.
pub fn is_plain_prop(s: &str) -> bool {
    plain_prop_regex().is_match(s)
}

/// Check if a string contains deep-path syntax: a `.` or a bracket group.
///
/// A bracket group is either `[` followed by any non-bracket characters and
/// `]`, or `[` a quoted string (backslash escapes allowed) `]`.
///
/// # Example
///
/// ```
/// use json_joy_json_get::path::is_deep_prop;
///
/// assert!(is_deep_prop("a.b"));
/// assert!(is_deep_prop("a[0]"));
/// assert!(is_deep_prop(r#"a["[x]"]"#));
/// assert!(!is_deep_prop("a-b"));
/// assert!(!is_deep_prop("a["));
/// ```
pub fn is_deep_prop(s: &str) -> bool {
    if s.contains('.') {
        return true;
    }
    let chars: Vec<char> = s.chars().collect();
    (0..chars.len()).any(|i| {
        chars[i] == '['
            && (plain_bracket_end(&chars, i).is_some() || quoted_bracket(&chars, i).is_some())
    })
}

/// Decide whether `s` is used as one key rather than parsed as a path.
///
/// True when `s` is a plain property, has no deep-path syntax, or names an
/// own property of `object`.
///
/// # Example
///
/// ```
/// use json_joy_json_get::path::is_key;
/// use serde_json::json;
///
/// assert!(is_key("abc", None));
/// assert!(!is_key("a.b", None));
/// assert!(is_key("a.b", Some(&json!({"a.b": 1}))));
/// ```
pub fn is_key(s: &str, object: Option<&Value>) -> bool {
    is_plain_prop(s)
        || !is_deep_prop(s)
        || object.is_some_and(|obj| property(obj, s).is_some())
}

/// Parse a dotted/bracketed property path string into keys.
///
/// - a leading `.` yields a leading empty key;
/// - runs of characters other than `.`, `[` and `]` are keys;
/// - `[` number `]` yields the number as written, e.g. `"-1"` or `"1.5"`;
/// - `[` quoted string `]` yields the unescaped string;
/// - a `.` or `[]` followed by another `.`, `[]` or the end of input yields
///   an empty key.
///
/// Anything else is skipped.
///
/// # Example
///
/// ```
/// use json_joy_json_get::string_to_path;
///
/// assert_eq!(string_to_path(".a"), vec!["", "a"]);
/// assert_eq!(string_to_path("a..b"), vec!["a", "", "b"]);
/// assert_eq!(string_to_path("a[]"), vec!["a", ""]);
/// assert_eq!(string_to_path(r#"a["b\"c"]"#), vec!["a", "b\"c"]);
/// ```
pub fn string_to_path(input: &str) -> Path {
    PathScanner::new(input).scan()
}

struct PathScanner {
    chars: Vec<char>,
    pos: usize,
}

impl PathScanner {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn scan(mut self) -> Path {
        let mut path = Vec::new();
        if self.peek() == Some('.') {
            path.push(String::new());
        }

        while !self.is_at_end() {
            if let Some(name) = self.scan_name() {
                path.push(name);
            } else if let Some(key) = self.scan_bracket() {
                path.push(key);
            } else {
                if self.at_empty_key() {
                    path.push(String::new());
                }
                self.pos += 1;
            }
        }

        path
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn scan_name(&mut self) -> Option<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '.' | '[' | ']') {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        Some(self.chars[start..self.pos].iter().collect())
    }

    fn scan_bracket(&mut self) -> Option<String> {
        if self.peek() != Some('[') {
            return None;
        }
        if let Some(end) = number_bracket_end(&self.chars, self.pos) {
            let key = self.chars[self.pos + 1..end].iter().collect();
            self.pos = end + 1;
            return Some(key);
        }
        let (body_end, close) = quoted_bracket(&self.chars, self.pos)?;
        let key = unescape(&self.chars[self.pos + 2..body_end]);
        self.pos = close + 1;
        Some(key)
    }

    /// `(?=(\.|\[\])(\.|\[\]|$))`
    fn at_empty_key(&self) -> bool {
        match separator_len(&self.chars, self.pos) {
            Some(len) => {
                let next = self.pos + len;
                next == self.chars.len() || separator_len(&self.chars, next).is_some()
            }
            None => false,
        }
    }
}

fn separator_len(chars: &[char], at: usize) -> Option<usize> {
    match chars.get(at) {
        Some('.') => Some(1),
        Some('[') if chars.get(at + 1) == Some(&']') => Some(2),
        _ => None,
    }
}

/// `[` `-?\d+(\.\d+)?` `]` starting at `open`, returns the index of `]`.
fn number_bracket_end(chars: &[char], open: usize) -> Option<usize> {
    let mut i = open + 1;
    if chars.get(i) == Some(&'-') {
        i += 1;
    }
    let int_start = i;
    while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
        i += 1;
    }
    if i == int_start {
        return None;
    }
    if chars.get(i) == Some(&'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
            j += 1;
        }
        if j > frac_start {
            i = j;
        }
    }
    (chars.get(i) == Some(&']')).then_some(i)
}

/// `[` followed by non-bracket characters and `]`, returns the index of `]`.
fn plain_bracket_end(chars: &[char], open: usize) -> Option<usize> {
    let mut i = open + 1;
    while let Some(&c) = chars.get(i) {
        match c {
            ']' => return Some(i),
            '[' => return None,
            _ => i += 1,
        }
    }
    None
}

/// `[` quote body quote `]` starting at `open`.
///
/// Returns the index of the closing quote and of the closing `]`. The body
/// ends at the first unescaped matching quote.
fn quoted_bracket(chars: &[char], open: usize) -> Option<(usize, usize)> {
    let quote = match chars.get(open + 1) {
        Some(&q @ ('"' | '\'')) => q,
        _ => return None,
    };
    let mut i = open + 2;
    while let Some(&c) = chars.get(i) {
        if c == quote {
            return (chars.get(i + 1) == Some(&']')).then_some((i, i + 1));
        }
        if c == '\\' {
            match chars.get(i + 1) {
                Some(&next) if !is_line_terminator(next) => i += 2,
                _ => return None,
            }
        } else {
            i += 1;
        }
    }
    None
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// `\\` becomes `\`, a lone `\` is dropped.
fn unescape(body: &[char]) -> String {
    let mut out = String::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        if body[i] == '\\' {
            if body.get(i + 1) == Some(&'\\') {
                out.push('\\');
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }
        out.push(body[i]);
        i += 1;
    }
    out
}

fn cast_string_path(s: &str, object: Option<&Value>) -> Path {
    if is_key(s, object) {
        return vec![s.to_string()];
    }
    let path = string_to_path(s);
    tracing::trace!(input = s, steps = path.len(), "parsed deep property path");
    path
}

/// Anything that can be used as a property path.
///
/// - strings are a single key or a parsed deep path, see [`is_key`];
/// - numbers and booleans are a single key;
/// - slices, arrays and `Vec`s are a list of keys, never parsed;
/// - [`Value`] paths dispatch on their type tag.
///
/// The root `object` is consulted only to check whether a deep-looking
/// string names one of its own properties.
pub trait PathLike {
    fn cast_path(&self, object: Option<&Value>) -> Path;
}

impl PathLike for str {
    fn cast_path(&self, object: Option<&Value>) -> Path {
        cast_string_path(self, object)
    }
}

impl PathLike for String {
    fn cast_path(&self, object: Option<&Value>) -> Path {
        cast_string_path(self, object)
    }
}

macro_rules! impl_path_like_single_key {
    ($($t:ty),*) => {
        $(
            impl PathLike for $t {
                fn cast_path(&self, _object: Option<&Value>) -> Path {
                    vec![self.to_key()]
                }
            }
        )*
    };
}

impl_path_like_single_key!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64
);

impl<K: ToKey> PathLike for [K] {
    fn cast_path(&self, _object: Option<&Value>) -> Path {
        self.iter().map(ToKey::to_key).collect()
    }
}

impl<K: ToKey, const N: usize> PathLike for [K; N] {
    fn cast_path(&self, object: Option<&Value>) -> Path {
        self.as_slice().cast_path(object)
    }
}

impl<K: ToKey> PathLike for Vec<K> {
    fn cast_path(&self, object: Option<&Value>) -> Path {
        self.as_slice().cast_path(object)
    }
}

impl PathLike for Value {
    fn cast_path(&self, object: Option<&Value>) -> Path {
        match self {
            Value::Array(items) => items.cast_path(object),
            Value::String(s) => cast_string_path(s, object),
            _ if tag_of(self).is_primitive_key() => vec![self.to_key()],
            _ => cast_string_path(&value_to_string(self), object),
        }
    }
}

impl<T: PathLike + ?Sized> PathLike for &T {
    fn cast_path(&self, object: Option<&Value>) -> Path {
        (**self).cast_path(object)
    }
}

/// Convert a path to its list of keys without consulting a root object.
///
/// # Example
///
/// ```
/// use json_joy_json_get::to_path;
/// use serde_json::json;
///
/// assert_eq!(to_path("a[0].b"), vec!["a", "0", "b"]);
/// assert_eq!(to_path(["a.b", "c"]), vec!["a.b", "c"]);
/// assert_eq!(to_path(&json!(["x", 1])), vec!["x", "1"]);
/// assert_eq!(to_path(2.5), vec!["2.5"]);
/// ```
pub fn to_path<P: PathLike>(path: P) -> Path {
    path.cast_path(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_plain_prop() {
        assert!(is_plain_prop(""));
        assert!(is_plain_prop("abc"));
        assert!(is_plain_prop("a_1"));
        assert!(is_plain_prop("0"));
        assert!(!is_plain_prop("a-b"));
        assert!(!is_plain_prop("a b"));
        assert!(!is_plain_prop("a.b"));
        // ASCII only
        assert!(!is_plain_prop("café"));
    }

    #[test]
    fn test_is_deep_prop() {
        assert!(is_deep_prop("."));
        assert!(is_deep_prop("a.b"));
        assert!(is_deep_prop("[]"));
        assert!(is_deep_prop("a[b]"));
        assert!(is_deep_prop("a['b']"));
        assert!(is_deep_prop(r#"a["]"]"#));
        assert!(!is_deep_prop("a["));
        assert!(!is_deep_prop("a]"));
        assert!(!is_deep_prop("a[[b"));
        assert!(!is_deep_prop("a-b"));
        assert!(!is_deep_prop(""));
    }

    #[test]
    fn test_is_key() {
        assert!(is_key("", None));
        assert!(is_key("a b", None));
        assert!(!is_key("a[0]", None));
        assert!(!is_key("a[0]", Some(&json!({"a": [1]}))));
        assert!(is_key("a[0]", Some(&json!({"a[0]": 1}))));
        assert!(!is_key("a.b", Some(&json!("a.b"))));
    }

    #[test]
    fn test_string_to_path_basic() {
        assert_eq!(string_to_path("a"), vec!["a"]);
        assert_eq!(string_to_path("a.b.c"), vec!["a", "b", "c"]);
        assert_eq!(string_to_path("a[0].b.c"), vec!["a", "0", "b", "c"]);
        assert_eq!(string_to_path("[0][1]"), vec!["0", "1"]);
        assert_eq!(string_to_path(""), Vec::<String>::new());
    }

    #[test]
    fn test_string_to_path_numbers() {
        assert_eq!(string_to_path("a[-1]"), vec!["a", "-1"]);
        assert_eq!(string_to_path("a[1.5]"), vec!["a", "1.5"]);
        assert_eq!(string_to_path("a[007]"), vec!["a", "007"]);
        // `[1.]` is not a number group; `1` is picked up as a name
        assert_eq!(string_to_path("a[1.]"), vec!["a", "1"]);
    }

    #[test]
    fn test_string_to_path_quoted() {
        assert_eq!(string_to_path("a['b']"), vec!["a", "b"]);
        assert_eq!(string_to_path(r#"a["b.c"]"#), vec!["a", "b.c"]);
        assert_eq!(string_to_path(r#"a["[x]"]"#), vec!["a", "[x]"]);
        assert_eq!(string_to_path(r"a['b\'c']"), vec!["a", "b'c"]);
        assert_eq!(string_to_path(r"a['b\\c']"), vec!["a", r"b\c"]);
        assert_eq!(string_to_path(r#"a["it's"]"#), vec!["a", "it's"]);
        assert_eq!(string_to_path("a['']"), vec!["a", ""]);
    }

    #[test]
    fn test_string_to_path_empty_keys() {
        assert_eq!(string_to_path(".a"), vec!["", "a"]);
        assert_eq!(string_to_path("a."), vec!["a", ""]);
        assert_eq!(string_to_path("a..b"), vec!["a", "", "b"]);
        assert_eq!(string_to_path("a[].b"), vec!["a", "", "b"]);
        assert_eq!(string_to_path("a[][]"), vec!["a", "", ""]);
        assert_eq!(string_to_path(".."), vec!["", "", ""]);
    }

    #[test]
    fn test_string_to_path_skips_stray_brackets() {
        assert_eq!(string_to_path("[object Object]"), vec!["object Object"]);
        assert_eq!(string_to_path("a]b"), vec!["a", "b"]);
        assert_eq!(string_to_path("a['b]"), vec!["a", "'b"]);
    }

    #[test]
    fn test_string_to_path_unclosed_quote() {
        // no closing quote: `[` is skipped, the rest is read as names
        assert_eq!(string_to_path("a['b"), vec!["a", "'b"]);
        // escaped line break does not count as an escape
        assert_eq!(string_to_path("a['b\\\n']"), vec!["a", "'b\\\n'"]);
    }

    #[test]
    fn test_cast_string_paths() {
        assert_eq!("a.b".cast_path(None), vec!["a", "b"]);
        assert_eq!("a.b".cast_path(Some(&json!({"a.b": 1}))), vec!["a.b"]);
        assert_eq!("a-b".cast_path(None), vec!["a-b"]);
        assert_eq!(String::from("x[1]").cast_path(None), vec!["x", "1"]);
    }

    #[test]
    fn test_cast_key_lists() {
        let keys: [&str; 2] = ["a.b", "[0]"];
        assert_eq!(keys.cast_path(None), vec!["a.b", "[0]"]);
        assert_eq!(vec![1usize, 2].cast_path(None), vec!["1", "2"]);
        let empty: &[String] = &[];
        assert_eq!(empty.cast_path(None), Vec::<String>::new());
    }

    #[test]
    fn test_cast_scalars() {
        assert_eq!(0usize.cast_path(None), vec!["0"]);
        assert_eq!((-0.0f64).cast_path(None), vec!["-0"]);
        assert_eq!(true.cast_path(None), vec!["true"]);
    }

    #[test]
    fn test_cast_value_paths() {
        assert_eq!(json!("a[0]").cast_path(None), vec!["a", "0"]);
        assert_eq!(json!(["a", 0, true]).cast_path(None), vec!["a", "0", "true"]);
        assert_eq!(json!(1.5).cast_path(None), vec!["1.5"]);
        assert_eq!(json!(null).cast_path(None), vec!["null"]);
        assert_eq!(json!(false).cast_path(None), vec!["false"]);
        assert_eq!(json!({"k": 1}).cast_path(None), vec!["object Object"]);
        assert_eq!(
            json!({"k": 1}).cast_path(Some(&json!({"[object Object]": 1}))),
            vec!["[object Object]"]
        );
    }
}

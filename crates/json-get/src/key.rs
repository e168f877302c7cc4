//! Conversion of path elements into property keys.

use serde_json::{Number, Value};

use crate::tag::Tag;

/// A path element that can be turned into a property key.
///
/// Keys are always strings: numbers print the way ECMAScript prints them,
/// except that negative zero keeps its sign (`"-0"`).
///
/// # Example
///
/// ```
/// use json_joy_json_get::ToKey;
/// use serde_json::json;
///
/// assert_eq!("a.b".to_key(), "a.b");
/// assert_eq!(3usize.to_key(), "3");
/// assert_eq!((-0.0f64).to_key(), "-0");
/// assert_eq!(json!([1, null, [2, 3]]).to_key(), "1,,2,3");
/// ```
pub trait ToKey {
    fn to_key(&self) -> String;
}

impl ToKey for str {
    fn to_key(&self) -> String {
        self.to_string()
    }
}

impl ToKey for String {
    fn to_key(&self) -> String {
        self.clone()
    }
}

impl ToKey for char {
    fn to_key(&self) -> String {
        self.to_string()
    }
}

impl ToKey for bool {
    fn to_key(&self) -> String {
        self.to_string()
    }
}

macro_rules! impl_to_key_int {
    ($($t:ty),*) => {
        $(
            impl ToKey for $t {
                fn to_key(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_to_key_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ToKey for f64 {
    fn to_key(&self) -> String {
        if *self == 0.0 && self.is_sign_negative() {
            return "-0".to_string();
        }
        format_number(*self)
    }
}

impl ToKey for f32 {
    fn to_key(&self) -> String {
        f64::from(*self).to_key()
    }
}

impl ToKey for Value {
    fn to_key(&self) -> String {
        match self {
            Value::Number(n) => number_key(n),
            _ => value_to_string(self),
        }
    }
}

impl<T: ToKey + ?Sized> ToKey for &T {
    fn to_key(&self) -> String {
        (**self).to_key()
    }
}

fn number_key(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map(|f| f.to_key()).unwrap_or_else(|| n.to_string())
}

/// Formats a number the way ECMAScript `Number.prototype.toString` does.
///
/// Both zeros print as `"0"`. Magnitudes at or above `1e21`, or below `1e-6`,
/// use exponent notation with an explicit sign (`"1e+21"`, `"1.5e-7"`).
///
/// ```
/// use json_joy_json_get::key::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(0.1), "0.1");
/// assert_eq!(format_number(1e21), "1e+21");
/// assert_eq!(format_number(f64::NAN), "NaN");
/// ```
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", n);
    }
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exp,
    }
}

/// Converts a value to its string form (`String(value)`).
///
/// Arrays are joined with `,` and render `null` elements as empty strings,
/// objects render as their tag.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format_number(f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let mut out = String::new();
            join_into(&mut out, items);
            out
        }
        Value::Object(_) => Tag::Object.as_str().to_string(),
    }
}

fn join_into(out: &mut String, items: &[Value]) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match item {
            Value::Null => {}
            Value::Array(nested) => join_into(out, nested),
            other => out.push_str(&value_to_string(other)),
        }
    }
}

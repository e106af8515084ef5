use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use crate::common::format_timestamp;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::mem::discriminant;

/// Top-level field data of a document, or the input of a write.
pub type Fields = BTreeMap<String, Value>;

/// Upper bound (exclusive) of `i64` as an exactly representable `f64` (2^63).
const I64_UPPER_AS_F64: f64 = 9_223_372_036_854_775_808.0;
/// Lower bound (inclusive) of `i64` as an exactly representable `f64` (-2^63).
const I64_LOWER_AS_F64: f64 = -9_223_372_036_854_775_808.0;

/// Compare two doubles under a total order in which NaN equals NaN and sorts
/// before every other number.
#[inline]
fn num_cmp_float(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Compare an integer against a double exactly, without rounding the integer
/// through `f64`.
#[inline]
fn num_cmp_int_float(i: i64, d: f64) -> Ordering {
    if d.is_nan() {
        return Ordering::Greater;
    }
    if d >= I64_UPPER_AS_F64 {
        return Ordering::Less;
    }
    if d < I64_LOWER_AS_F64 {
        return Ordering::Greater;
    }

    let whole = d.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let fraction = d - whole;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        ordering => ordering,
    }
}

/// Compares an integer field against a double operand truncated toward zero.
/// A NaN operand is unordered; operands beyond the `i64` range order past
/// every integer.
#[inline]
fn truncated_cmp(field: i64, operand: f64) -> Option<Ordering> {
    if operand.is_nan() {
        None
    } else if operand >= I64_UPPER_AS_F64 {
        Some(Ordering::Less)
    } else if operand < I64_LOWER_AS_F64 {
        Some(Ordering::Greater)
    } else {
        Some(field.cmp(&(operand.trunc() as i64)))
    }
}

/// A field value stored in a document.
///
/// # Variants
/// - `Null`: explicit null
/// - `Boolean`: `false` sorts before `true`
/// - `Integer` / `Double`: numbers, compared numerically with each other
/// - `Timestamp`: a UTC instant, compared chronologically
/// - `String`: compared byte-lexicographically
/// - `Bytes`: compared byte-lexicographically
/// - `Array`: compared element by element, a strict prefix sorts first
/// - `Map`: compared key by key in sorted key order, a strict prefix sorts first
///
/// # Ordering
/// `Value` implements a total order so that query results can always be sorted
/// deterministically. Values of different types are ordered by type rank:
/// null, boolean, number, timestamp, string, bytes, array, map.
///
/// Filters do not use this cross-type order. They go through [Value::filter_cmp],
/// which only relates values of the same type (with integer/double operand
/// coercion) and reports anything else as unordered.
///
/// # Usage
/// ```rust
/// use firemock::common::Value;
///
/// let v: Value = 42.into();
/// assert_eq!(v.as_integer(), Some(42));
/// assert!(Value::from(1) < Value::from("a"));
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Boolean(bool),
    /// Represents a signed 64-bit integer value.
    Integer(i64),
    /// Represents a 64-bit floating point value.
    Double(f64),
    /// Represents a UTC instant.
    Timestamp(DateTime<Utc>),
    /// Represents a string value.
    String(String),
    /// Represents a byte sequence.
    Bytes(Vec<u8>),
    /// Represents an ordered sequence of values.
    Array(Vec<Value>),
    /// Represents a nested map of named values.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Position of this value's type in the cross-type sort order.
    pub fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Integer(_) | Value::Double(_) => 2,
            Value::Timestamp(_) => 3,
            Value::String(_) => 4,
            Value::Bytes(_) => 5,
            Value::Array(_) => 6,
            Value::Map(_) => 7,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Double(_) => "double",
            Value::Timestamp(_) => "timestamp",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    /// Compares a field value (`self`) against a filter operand.
    ///
    /// Returns `None` when the two values are not comparable: different types,
    /// except that an integer or double operand is first coerced to the
    /// representation of the field (an integer field truncates a double operand,
    /// a double field widens an integer operand).
    ///
    /// # Examples
    /// ```rust
    /// use firemock::common::Value;
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(Value::Double(2.5).filter_cmp(&Value::Integer(2)), Some(Ordering::Greater));
    /// assert_eq!(Value::Integer(2).filter_cmp(&Value::Double(2.9)), Some(Ordering::Equal));
    /// assert_eq!(Value::from("2").filter_cmp(&Value::Integer(2)), None);
    /// ```
    pub fn filter_cmp(&self, operand: &Value) -> Option<Ordering> {
        match (self, operand) {
            (Value::Integer(field), Value::Double(operand)) => {
                truncated_cmp(*field, *operand)
            }
            (Value::Double(field), Value::Integer(operand)) => {
                Some(num_cmp_float(*field, *operand as f64))
            }
            (field, operand) if discriminant(field) == discriminant(operand) => {
                Some(field.cmp(operand))
            }
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Double(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<String, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Builds a [Value::Bytes]; `Vec<u8>` has no `From` impl because it would
    /// collide with arrays of small integers.
    pub fn bytes(value: impl Into<Vec<u8>>) -> Value {
        Value::Bytes(value.into())
    }

    /// Renders this value as JSON, using the same conventions the bulk loader
    /// accepts: RFC 3339 strings for timestamps and base64 data URIs for bytes.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(v) => serde_json::Value::Bool(*v),
            Value::Integer(v) => serde_json::Value::from(*v),
            Value::Double(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Timestamp(v) => serde_json::Value::String(format_timestamp(v)),
            Value::String(v) => serde_json::Value::String(v.clone()),
            Value::Bytes(v) => serde_json::Value::String(format!(
                "data:application/octet-stream;base64,{}",
                BASE64.encode(v)
            )),
            Value::Array(v) => serde_json::Value::Array(v.iter().map(Value::to_json).collect()),
            Value::Map(v) => serde_json::Value::Object(
                v.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    /// Useful for moving a value out of a mutable slot without cloning.
    pub fn take(&mut self) -> Value {
        std::mem::replace(self, Value::Null)
    }

    fn cmp_same_rank(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Double(a), Value::Double(b)) => num_cmp_float(*a, *b),
            (Value::Integer(a), Value::Double(b)) => num_cmp_int_float(*a, *b),
            (Value::Double(a), Value::Integer(b)) => num_cmp_int_float(*b, *a).reverse(),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ordering = x.cmp(y);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                // equal prefix: the shorter array sorts first
                a.len().cmp(&b.len())
            }
            (Value::Map(a), Value::Map(b)) => {
                // BTreeMap iterates in sorted key order
                for ((ak, av), (bk, bv)) in a.iter().zip(b.iter()) {
                    let ordering = ak.as_bytes().cmp(bk.as_bytes()).then_with(|| av.cmp(bv));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                a.len().cmp(&b.len())
            }
            // only reachable for mismatched ranks, which cmp() rules out
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.type_rank()
            .cmp(&other.type_rank())
            .then_with(|| self.cmp_same_rank(other))
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(v) => write!(f, "boolean({})", v),
            Value::Integer(v) => write!(f, "integer({})", v),
            Value::Double(v) => write!(f, "double({})", v),
            Value::Timestamp(v) => write!(f, "timestamp({})", v.to_rfc3339()),
            Value::String(v) => write!(f, "string({:?})", v),
            Value::Bytes(v) => write!(f, "bytes({:?})", v),
            Value::Array(v) => f.debug_list().entries(v.iter()).finish(),
            Value::Map(v) => f.debug_map().entries(v.iter()).finish(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    #[inline]
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    #[inline]
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Field-value equality as used by `EQUAL` filters: `false` across types.
pub fn equal(field: &Value, operand: &Value) -> bool {
    field.filter_cmp(operand) == Some(Ordering::Equal)
}

/// Field-value ordering as used by range filters: `false` across types.
pub fn less(field: &Value, operand: &Value) -> bool {
    field.filter_cmp(operand) == Some(Ordering::Less)
}

/// Builds a [Fields] map (or a [Value::Map] through `.into()`) from
/// `key => value` pairs.
///
/// ```rust
/// use firemock::fields;
/// use firemock::common::Value;
///
/// let f = fields! { "name" => "Alice", "age" => 30 };
/// assert_eq!(f.get("age"), Some(&Value::Integer(30)));
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::common::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::common::Fields::new();
        $(
            map.insert($key.to_string(), $crate::common::Value::from($value));
        )+
        map
    }};
}

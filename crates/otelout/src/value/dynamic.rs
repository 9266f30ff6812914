//! Dynamic — the untyped input model handed over by a decoder.
//!
//! Mirrors what a msgpack/forward decoder can produce: scalars, text and byte
//! strings, sequences, and maps whose keys are not necessarily strings.

use bytes::Bytes;

/// A decoded, runtime-shaped value.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    Null,
    Bool(bool),
    /// Any signed integer width, widened.
    Int(i64),
    /// Any unsigned integer width, widened.
    UInt(u64),
    /// f32 or f64, widened.
    Float(f64),
    Str(String),
    Bytes(Bytes),
    Seq(Vec<DynamicValue>),
    /// A sequence the decoder already knows to contain only maps.
    MapSeq(Vec<DynamicMap>),
    Map(DynamicMap),
}

/// Map key as found on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicKey {
    Str(String),
    Bytes(Bytes),
    /// Any other value used as a key (integers, nested sequences, ...).
    Value(DynamicValue),
}

/// An ordered map with heterogeneous keys.
///
/// Entries keep decode order and are not de-duplicated: a string key `"x"` and
/// a byte-string key `"x"` are two distinct entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicMap {
    entries: Vec<(DynamicKey, DynamicValue)>,
}

impl DynamicMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: DynamicKey, value: DynamicValue) {
        self.entries.push((key, value));
    }

    /// Builder-style insert with a string key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DynamicValue>) -> Self {
        self.entries.push((DynamicKey::Str(key.into()), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DynamicKey, &DynamicValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Look up a value by its textual key name.
    ///
    /// An exact string key wins over a byte-string key, which wins over any
    /// other key whose string form matches.
    pub fn get(&self, name: &str) -> Option<&DynamicValue> {
        self.entries
            .iter()
            .find(|(k, _)| matches!(k, DynamicKey::Str(s) if s == name))
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(k, _)| matches!(k, DynamicKey::Bytes(b) if &b[..] == name.as_bytes()))
            })
            .or_else(|| self.entries.iter().find(|(k, _)| k.to_text() == name))
            .map(|(_, v)| v)
    }

    /// True when some key stringifies to `name`.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.to_text() == name)
    }
}

impl FromIterator<(DynamicKey, DynamicValue)> for DynamicMap {
    fn from_iter<I: IntoIterator<Item = (DynamicKey, DynamicValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl DynamicKey {
    /// Key as text. Keys that are neither text nor bytes collapse to `""`,
    /// except byte-like integer sequences which are read as bytes.
    pub fn to_text(&self) -> String {
        match self {
            DynamicKey::Str(s) => s.clone(),
            DynamicKey::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            DynamicKey::Value(v) => v.to_text(),
        }
    }
}

impl DynamicValue {
    /// Text form used for key names and severity lookup.
    ///
    /// Only strings, byte strings and byte-like sequences have one; every
    /// other shape yields the empty string.
    pub fn to_text(&self) -> String {
        match self {
            DynamicValue::Str(s) => s.clone(),
            DynamicValue::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            DynamicValue::Seq(items) => match byte_like(items) {
                Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                None => String::new(),
            },
            _ => String::new(),
        }
    }

    pub fn as_map(&self) -> Option<&DynamicMap> {
        match self {
            DynamicValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// The element as a byte, if it is an integer in `0..=255`.
    fn as_byte(&self) -> Option<u8> {
        match *self {
            DynamicValue::Int(n) => u8::try_from(n).ok(),
            DynamicValue::UInt(n) => u8::try_from(n).ok(),
            _ => None,
        }
    }
}

/// Collect a sequence into bytes when every element is an integer in
/// `0..=255`. An empty sequence qualifies.
pub(crate) fn byte_like(items: &[DynamicValue]) -> Option<Vec<u8>> {
    items.iter().map(DynamicValue::as_byte).collect()
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self {
        DynamicValue::Str(s.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(s: String) -> Self {
        DynamicValue::Str(s)
    }
}

impl From<bool> for DynamicValue {
    fn from(b: bool) -> Self {
        DynamicValue::Bool(b)
    }
}

impl From<i64> for DynamicValue {
    fn from(n: i64) -> Self {
        DynamicValue::Int(n)
    }
}

impl From<i32> for DynamicValue {
    fn from(n: i32) -> Self {
        DynamicValue::Int(n.into())
    }
}

impl From<u64> for DynamicValue {
    fn from(n: u64) -> Self {
        DynamicValue::UInt(n)
    }
}

impl From<f64> for DynamicValue {
    fn from(f: f64) -> Self {
        DynamicValue::Float(f)
    }
}

impl From<f32> for DynamicValue {
    fn from(f: f32) -> Self {
        DynamicValue::Float(f.into())
    }
}

impl From<Bytes> for DynamicValue {
    fn from(b: Bytes) -> Self {
        DynamicValue::Bytes(b)
    }
}

impl From<DynamicMap> for DynamicValue {
    fn from(m: DynamicMap) -> Self {
        DynamicValue::Map(m)
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(items: Vec<DynamicValue>) -> Self {
        DynamicValue::Seq(items)
    }
}

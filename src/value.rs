use serde::{Deserialize, Serialize};
use std::fmt;

/// A single property value.
///
/// `Unset` is a first-class value: it is what a declared-but-unassigned
/// property holds, it is always writable regardless of any validator
/// (deferred initialization), and [`StrictParamSet`](crate::StrictParamSet)
/// reads it as "absent". A value domain that legitimately contains `Unset`
/// as data therefore collides with those two meanings; declare a validator
/// that accepts `Unset` to opt the strict read path out of the absence
/// interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Unset,
}

/// The kind of a [`ParamValue`], used for type-membership validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Int,
    Float,
    Bool,
    Str,
    Unset,
}

impl ParamValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ParamValue::Int(_) => ValueKind::Int,
            ParamValue::Float(_) => ValueKind::Float,
            ParamValue::Bool(_) => ValueKind::Bool,
            ParamValue::Str(_) => ValueKind::Str,
            ParamValue::Unset => ValueKind::Unset,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, ParamValue::Unset)
    }

    /// Numeric view; `Int` widens to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Str(v) => write!(f, "{v}"),
            ParamValue::Unset => write!(f, "<unset>"),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => write!(f, "int"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Str => write!(f, "str"),
            ValueKind::Unset => write!(f, "unset"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_variants() {
        assert_eq!(ParamValue::Int(3).kind(), ValueKind::Int);
        assert_eq!(ParamValue::Float(0.5).kind(), ValueKind::Float);
        assert_eq!(ParamValue::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(ParamValue::from("relu").kind(), ValueKind::Str);
        assert_eq!(ParamValue::Unset.kind(), ValueKind::Unset);
    }

    #[test]
    fn int_widens_to_float() {
        assert_eq!(ParamValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(ParamValue::Float(0.25).as_f64(), Some(0.25));
        assert_eq!(ParamValue::from("2").as_f64(), None);
        assert_eq!(ParamValue::Unset.as_f64(), None);
    }

    #[test]
    fn serde_round_trip() {
        for value in [
            ParamValue::Int(7),
            ParamValue::Float(1e-3),
            ParamValue::Bool(false),
            ParamValue::from("gelu"),
            ParamValue::Unset,
        ] {
            let json = serde_json::to_string(&value).unwrap();
            let back: ParamValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value);
        }
    }
}

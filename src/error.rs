use crate::ParamValue;
use std::fmt;
use thiserror::Error;

/// Which guard blocked a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Frozen,
    Sealed,
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Frozen => write!(f, "frozen"),
            Guard::Sealed => write!(f, "sealed"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParamError {
    #[error("container is {guard}; key `{key}` cannot be written")]
    AccessDenied { key: String, guard: Guard },
    #[error("`{0}` is not a known property")]
    KeyNotFound(String),
    #[error("{value} is not a valid value for property `{name}`")]
    InvalidValue { name: String, value: ParamValue },
    #[error("property `{0}` declared more than once")]
    DuplicateName(String),
}

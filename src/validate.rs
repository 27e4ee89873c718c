use crate::{ParamValue, ValueKind};
use std::fmt;

/// Accept/reject test gating candidate property values.
///
/// Implementations carry no state beyond their constructor parameters and
/// are shared as `Arc<dyn Validator>` across every descriptor that uses
/// them. Containers call nothing but [`accepts`](Validator::accepts).
pub trait Validator: fmt::Debug + Send + Sync {
    fn accepts(&self, value: &ParamValue) -> bool;
}

/// Accepts any value except the unset marker.
#[derive(Debug, Clone, Copy)]
pub struct Defined;

impl Validator for Defined {
    fn accepts(&self, value: &ParamValue) -> bool {
        !value.is_unset()
    }
}

/// Accepts values of one [`ValueKind`].
#[derive(Debug, Clone, Copy)]
pub struct OfKind(pub ValueKind);

impl Validator for OfKind {
    fn accepts(&self, value: &ParamValue) -> bool {
        value.kind() == self.0
    }
}

/// Accepts numeric values inside an inclusive range.
#[derive(Debug, Clone, Copy)]
pub struct InclusiveRange {
    low: f64,
    high: f64,
}

impl InclusiveRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

impl Validator for InclusiveRange {
    fn accepts(&self, value: &ParamValue) -> bool {
        match value.as_f64() {
            Some(v) => self.low <= v && v <= self.high,
            None => false,
        }
    }
}

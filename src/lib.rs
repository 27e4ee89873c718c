//! Schema-validated property containers for model configuration.
//!
//! A schema is an ordered list of [`ParamSpec`] descriptors, each naming a
//! property with documentation, an optional [`Validator`], and an optional
//! default. A [`ParamSet`] instantiates that schema with caller overrides
//! and guarantees every stored value either satisfies its declared
//! constraint or is explicitly unset; [`StrictParamSet`] additionally
//! reports unset properties as absent, so mandatory-but-forgotten
//! hyperparameters surface up front instead of deep inside a training run.
//!
//! Containers can be sealed (no new keys; every set seals itself at
//! construction) and frozen (no writes at all); a frozen set is immutable
//! for the rest of its lifetime and safe to share by reference.

mod error;
mod params;
mod props;
mod strict;
mod validate;
mod value;

pub use error::{Guard, ParamError};
pub use params::{Overrides, ParamSet, ParamSpec};
pub use props::PropertyMap;
pub use strict::StrictParamSet;
pub use validate::{Defined, InclusiveRange, OfKind, Validator};
pub use value::{ParamValue, ValueKind};

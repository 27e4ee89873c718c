use crate::{ParamError, ParamValue, PropertyMap, Validator};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Declares one property: name, documentation, optional validator,
/// optional default. Immutable once built; share one `Arc<ParamSpec>`
/// across every set declaring the property rather than copying it.
#[derive(Debug)]
pub struct ParamSpec {
    name: String,
    text: String,
    validator: Option<Arc<dyn Validator>>,
    default: Option<ParamValue>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            validator: None,
            default: None,
        }
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Attaches an already-shared validator, for predicates reused across
    /// many descriptors.
    pub fn with_shared_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn validator(&self) -> Option<&Arc<dyn Validator>> {
        self.validator.as_ref()
    }

    pub fn default(&self) -> Option<&ParamValue> {
        self.default.as_ref()
    }
}

/// Caller-supplied initial values, applied by name.
pub type Overrides = BTreeMap<String, ParamValue>;

/// Initial-value precedence: override, then inherited prototype value,
/// then declared default, then the unset marker.
fn resolve_initial(
    overridden: Option<&ParamValue>,
    inherited: Option<&ParamValue>,
    default: Option<&ParamValue>,
) -> ParamValue {
    overridden
        .or(inherited)
        .or(default)
        .cloned()
        .unwrap_or(ParamValue::Unset)
}

/// A property container bound to a fixed schema.
///
/// Built from an ordered sequence of [`ParamSpec`]s, or from another set
/// whose schema and current values it inherits. Construction resolves an
/// initial value for every declared name, pushes each through the
/// validated write path, and always ends by sealing the underlying map:
/// the key set is fixed for the container's lifetime, while values stay
/// writable until the caller additionally calls [`freeze`](Self::freeze).
#[derive(Debug)]
pub struct ParamSet {
    values: PropertyMap,
    specs: BTreeMap<String, Arc<ParamSpec>>,
    order: Vec<Arc<ParamSpec>>,
}

impl ParamSet {
    /// Builds a set from a schema sequence; defaults supply any value not
    /// overridden.
    pub fn from_specs(
        specs: impl IntoIterator<Item = Arc<ParamSpec>>,
        overrides: Overrides,
    ) -> Result<Self, ParamError> {
        Self::build(specs.into_iter().collect(), None, overrides)
    }

    /// Builds a set that reuses `prototype`'s schema and inherits its
    /// current values for anything not overridden.
    pub fn from_prototype(prototype: &ParamSet, overrides: Overrides) -> Result<Self, ParamError> {
        Self::build(prototype.order.clone(), Some(&prototype.values), overrides)
    }

    fn build(
        order: Vec<Arc<ParamSpec>>,
        inherited: Option<&PropertyMap>,
        overrides: Overrides,
    ) -> Result<Self, ParamError> {
        let mut specs = BTreeMap::new();
        for spec in &order {
            let name = spec.name().to_string();
            if specs.insert(name, Arc::clone(spec)).is_some() {
                return Err(ParamError::DuplicateName(spec.name().to_string()));
            }
        }

        let mut resolved = Vec::with_capacity(order.len());
        for spec in &order {
            let name = spec.name();
            let value = resolve_initial(
                overrides.get(name),
                inherited.and_then(|values| values.get(name).ok()),
                spec.default(),
            );
            resolved.push((name.to_string(), value));
        }

        let mut set = Self {
            values: PropertyMap::new(),
            specs,
            order,
        };
        for (name, value) in resolved {
            set.set(name, value)?;
        }
        set.values.seal();
        debug!(properties = set.order.len(), "parameter set sealed");
        Ok(set)
    }

    /// Fails with [`ParamError::KeyNotFound`] for names outside the
    /// schema; a declared-but-unset property reads back as
    /// [`ParamValue::Unset`].
    pub fn get(&self, name: &str) -> Result<&ParamValue, ParamError> {
        if !self.specs.contains_key(name) {
            return Err(ParamError::KeyNotFound(name.to_string()));
        }
        self.values.get(name)
    }

    /// Validated write. Schema membership is checked first, then the
    /// declared validator (the unset marker always passes, so a property
    /// can be declared now and given a real value later), then the
    /// frozen/sealed guards of the underlying map.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Result<(), ParamError> {
        let name = name.into();
        let value = value.into();
        let spec = self
            .specs
            .get(&name)
            .ok_or_else(|| ParamError::KeyNotFound(name.clone()))?;
        if !value.is_unset() {
            if let Some(validator) = spec.validator() {
                if !validator.accepts(&value) {
                    debug!(%name, %value, "write rejected by validator");
                    return Err(ParamError::InvalidValue { name, value });
                }
            }
        }
        self.values.set(name, value)
    }

    /// The schema in its original declaration order.
    pub fn schema(&self) -> &[Arc<ParamSpec>] {
        &self.order
    }

    /// The name-to-descriptor table.
    pub fn specs(&self) -> &BTreeMap<String, Arc<ParamSpec>> {
        &self.specs
    }

    pub fn spec(&self, name: &str) -> Option<&Arc<ParamSpec>> {
        self.specs.get(name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// (name, value) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.order
            .iter()
            .filter_map(|spec| self.values.get(spec.name()).ok().map(|v| (spec.name(), v)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn freeze(&mut self) {
        self.values.freeze();
    }

    pub fn seal(&mut self) {
        self.values.seal();
    }

    pub fn is_frozen(&self) -> bool {
        self.values.is_frozen()
    }

    pub fn is_sealed(&self) -> bool {
        self.values.is_sealed()
    }

    /// An unguarded [`PropertyMap`] duplicate of the current values, for
    /// branching off a freely mutable working copy.
    pub fn copy_values(&self) -> PropertyMap {
        self.values.copy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Guard, InclusiveRange, OfKind, ValueKind};

    fn schema() -> Vec<Arc<ParamSpec>> {
        vec![
            Arc::new(
                ParamSpec::new("lr", "learning rate")
                    .with_validator(InclusiveRange::new(0.0, 1.0))
                    .with_default(0.01),
            ),
            Arc::new(ParamSpec::new("layers", "layer count").with_default(1)),
            Arc::new(
                ParamSpec::new("optimizer", "optimizer name")
                    .with_validator(OfKind(ValueKind::Str)),
            ),
        ]
    }

    #[test]
    fn defaults_fill_unoverridden_names() {
        let set = ParamSet::from_specs(schema(), Overrides::new()).unwrap();
        assert_eq!(set.get("lr").unwrap(), &ParamValue::Float(0.01));
        assert_eq!(set.get("layers").unwrap(), &ParamValue::Int(1));
        assert_eq!(set.get("optimizer").unwrap(), &ParamValue::Unset);
    }

    #[test]
    fn overrides_win_over_defaults() {
        let overrides = Overrides::from([("lr".to_string(), ParamValue::Float(0.5))]);
        let set = ParamSet::from_specs(schema(), overrides).unwrap();
        assert_eq!(set.get("lr").unwrap(), &ParamValue::Float(0.5));
        assert_eq!(set.get("layers").unwrap(), &ParamValue::Int(1));
    }

    #[test]
    fn invalid_override_fails_construction() {
        let overrides = Overrides::from([("lr".to_string(), ParamValue::Float(5.0))]);
        let err = ParamSet::from_specs(schema(), overrides).unwrap_err();
        assert!(matches!(err, ParamError::InvalidValue { name, .. } if name == "lr"));
    }

    #[test]
    fn duplicate_declaration_fails_before_resolution() {
        let mut specs = schema();
        specs.push(Arc::new(ParamSpec::new("lr", "duplicate")));
        let err = ParamSet::from_specs(specs, Overrides::new()).unwrap_err();
        assert!(matches!(err, ParamError::DuplicateName(name) if name == "lr"));
    }

    #[test]
    fn sealed_after_construction() {
        let mut set = ParamSet::from_specs(schema(), Overrides::new()).unwrap();
        assert!(set.is_sealed());
        assert!(!set.is_frozen());
        // unknown names are a schema violation, not a seal violation
        assert!(matches!(
            set.set("momentum", 0.9),
            Err(ParamError::KeyNotFound(name)) if name == "momentum"
        ));
        set.set("lr", 0.2).unwrap();
    }

    #[test]
    fn validator_gates_post_construction_writes() {
        let mut set = ParamSet::from_specs(schema(), Overrides::new()).unwrap();
        assert!(matches!(
            set.set("lr", 1.5),
            Err(ParamError::InvalidValue { .. })
        ));
        assert!(matches!(
            set.set("optimizer", 3),
            Err(ParamError::InvalidValue { .. })
        ));
        set.set("optimizer", "adam").unwrap();
    }

    #[test]
    fn unset_marker_always_writes() {
        let mut set = ParamSet::from_specs(schema(), Overrides::new()).unwrap();
        set.set("lr", 0.3).unwrap();
        set.set("lr", ParamValue::Unset).unwrap();
        assert_eq!(set.get("lr").unwrap(), &ParamValue::Unset);
    }

    #[test]
    fn freeze_blocks_value_writes() {
        let mut set = ParamSet::from_specs(schema(), Overrides::new()).unwrap();
        set.freeze();
        assert!(matches!(
            set.set("lr", 0.2),
            Err(ParamError::AccessDenied {
                guard: Guard::Frozen,
                ..
            })
        ));
        assert_eq!(set.get("lr").unwrap(), &ParamValue::Float(0.01));
    }

    #[test]
    fn prototype_values_beat_defaults_and_lose_to_overrides() {
        let overrides = Overrides::from([("lr".to_string(), ParamValue::Float(0.7))]);
        let parent = ParamSet::from_specs(schema(), overrides).unwrap();

        let child_overrides = Overrides::from([("layers".to_string(), ParamValue::Int(5))]);
        let child = ParamSet::from_prototype(&parent, child_overrides).unwrap();
        assert_eq!(child.get("lr").unwrap(), &ParamValue::Float(0.7));
        assert_eq!(child.get("layers").unwrap(), &ParamValue::Int(5));

        // descriptors are shared, not copied
        assert!(Arc::ptr_eq(&parent.schema()[0], &child.schema()[0]));
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let set = ParamSet::from_specs(schema(), Overrides::new()).unwrap();
        let names: Vec<&str> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["lr", "layers", "optimizer"]);
        let texts: Vec<&str> = set.schema().iter().map(|spec| spec.text()).collect();
        assert_eq!(texts, ["learning rate", "layer count", "optimizer name"]);
    }

    #[test]
    fn copy_values_is_unguarded() {
        let mut set = ParamSet::from_specs(schema(), Overrides::new()).unwrap();
        set.freeze();
        let mut working = set.copy_values();
        assert!(!working.is_sealed());
        working.set("extra", ParamValue::Int(9)).unwrap();
        assert_eq!(working.len(), 4);
    }

    #[test]
    fn precedence_helper_orders_sources() {
        let over = ParamValue::Int(1);
        let inherited = ParamValue::Int(2);
        let default = ParamValue::Int(3);
        assert_eq!(
            resolve_initial(Some(&over), Some(&inherited), Some(&default)),
            over
        );
        assert_eq!(
            resolve_initial(None, Some(&inherited), Some(&default)),
            inherited
        );
        assert_eq!(resolve_initial(None, None, Some(&default)), default);
        assert_eq!(resolve_initial(None, None, None), ParamValue::Unset);
    }
}

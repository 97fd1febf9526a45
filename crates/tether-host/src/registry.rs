//! Class registry.
//!
//! One registry per process holds every adapted class, keyed by class
//! name. Registration builds the class description once; creation looks the
//! class up by name and returns a type-erased instance. The registry is an
//! ordinary value owned by the host bridge's initialisation code, so
//! teardown is explicit: [`ClassRegistry::clear`] or drop.

use std::collections::HashMap;
use std::sync::Arc;

use tether_core::{AdapterError, AdapterResult, Atom, ClassConfig, Client};

use crate::adapter::Adapter;
use crate::class::ClassSpec;
use crate::dispatch::Dispatch;
use crate::host::{HostObject, Scheduler};
use crate::instance::Instance;

/// Factory function type for creating instances of one class.
pub type InstanceFactory<H> =
    fn(&'static ClassConfig, H, Arc<dyn Scheduler>, &[Atom]) -> AdapterResult<Box<dyn Instance>>;

fn create_instance<C, H>(
    config: &'static ClassConfig,
    host: H,
    scheduler: Arc<dyn Scheduler>,
    args: &[Atom],
) -> AdapterResult<Box<dyn Instance>>
where
    C: Client,
    C::Capability: Dispatch<C>,
    H: HostObject,
{
    let adapter = Adapter::<C, H>::new(config, host, scheduler, args)?;
    Ok(Box::new(adapter))
}

struct Registration<H> {
    config: &'static ClassConfig,
    spec: ClassSpec,
    factory: InstanceFactory<H>,
}

/// Registered classes for host objects of type `H`.
pub struct ClassRegistry<H: HostObject> {
    classes: HashMap<&'static str, Registration<H>>,
}

impl<H: HostObject> ClassRegistry<H> {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Register client type `C` under `config.name`.
    ///
    /// Returns the class description for the host to build its class from.
    ///
    /// # Errors
    ///
    /// [`AdapterError::DuplicateClass`] if the name is already taken.
    pub fn register<C>(&mut self, config: &'static ClassConfig) -> AdapterResult<&ClassSpec>
    where
        C: Client,
        C::Capability: Dispatch<C>,
    {
        if self.classes.contains_key(config.name) {
            return Err(AdapterError::DuplicateClass(config.name.to_string()));
        }

        let spec = Adapter::<C, H>::class_spec(config);
        log::debug!(
            "class registered: {} ({} methods)",
            config.name,
            spec.methods().len()
        );

        let registration = self.classes.entry(config.name).or_insert(Registration {
            config,
            spec,
            factory: create_instance::<C, H>,
        });
        Ok(&registration.spec)
    }

    /// Create an instance of a registered class.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnknownClass`] if no class has that name, or any
    /// error from construction.
    pub fn create(
        &self,
        name: &str,
        host: H,
        scheduler: Arc<dyn Scheduler>,
        args: &[Atom],
    ) -> AdapterResult<Box<dyn Instance>> {
        let registration = self
            .classes
            .get(name)
            .ok_or_else(|| AdapterError::UnknownClass(name.to_string()))?;
        (registration.factory)(registration.config, host, scheduler, args)
    }

    /// Class description of a registered class.
    pub fn spec(&self, name: &str) -> Option<&ClassSpec> {
        self.classes.get(name).map(|r| &r.spec)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered class names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.classes.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Remove one class. Existing instances are unaffected.
    pub fn unregister(&mut self, name: &str) -> bool {
        let removed = self.classes.remove(name).is_some();
        if removed {
            log::debug!("class unregistered: {}", name);
        }
        removed
    }

    /// Remove every class.
    pub fn clear(&mut self) {
        if !self.classes.is_empty() {
            log::debug!("class registry cleared ({} classes)", self.classes.len());
        }
        self.classes.clear();
    }
}

impl<H: HostObject> Default for ClassRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HostObject> Drop for ClassRegistry<H> {
    fn drop(&mut self) {
        log::debug!("class registry torn down ({} classes)", self.classes.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Gain, MockHost, Normalize, QueueScheduler};
    use tether_core::StrategyKind;

    static GAIN: ClassConfig = ClassConfig::new("gain~").with_help("gain-help");
    static NORMALIZE: ClassConfig = ClassConfig::new("normalize");

    fn scheduler() -> Arc<dyn Scheduler> {
        Arc::new(QueueScheduler::default())
    }

    #[test]
    fn test_register_and_create() {
        let mut registry = ClassRegistry::<MockHost>::new();
        let spec = registry.register::<Gain>(&GAIN).unwrap();
        assert_eq!(spec.name(), "gain~");
        assert_eq!(spec.help(), "gain-help");
        registry.register::<Normalize>(&NORMALIZE).unwrap();

        assert_eq!(registry.names(), ["gain~", "normalize"]);

        let mut instance = registry
            .create("gain~", MockHost::default(), scheduler(), &[Atom::Float(2.0)])
            .unwrap();
        assert_eq!(instance.class_name(), "gain~");
        assert_eq!(instance.strategy_kind(), StrategyKind::RealTime);

        instance.message("gain", &[Atom::Float(0.5)]).unwrap();
        assert_eq!(instance.parameter("gain").unwrap(), [Atom::Float(0.5)]);
        assert_eq!(instance.parameter("channels").unwrap(), [Atom::Float(2.0)]);

        let offline = registry
            .create("normalize", MockHost::default(), scheduler(), &[])
            .unwrap();
        assert_eq!(offline.strategy_kind(), StrategyKind::NonRealTime);
    }

    #[test]
    fn test_duplicate_and_unknown() {
        let mut registry = ClassRegistry::<MockHost>::new();
        registry.register::<Gain>(&GAIN).unwrap();
        assert!(matches!(
            registry.register::<Normalize>(&GAIN),
            Err(AdapterError::DuplicateClass(_))
        ));
        assert!(matches!(
            registry.create("missing", MockHost::default(), scheduler(), &[]),
            Err(AdapterError::UnknownClass(_))
        ));
    }

    #[test]
    fn test_teardown() {
        let mut registry = ClassRegistry::<MockHost>::new();
        registry.register::<Gain>(&GAIN).unwrap();
        registry.register::<Normalize>(&NORMALIZE).unwrap();

        let instance = registry
            .create("gain~", MockHost::default(), scheduler(), &[])
            .unwrap();

        assert!(registry.unregister("gain~"));
        assert!(!registry.unregister("gain~"));
        assert!(registry.spec("gain~").is_none());

        registry.clear();
        assert!(registry.is_empty());

        // Instances outlive their class registration
        assert!(instance.parameter("gain").is_ok());
    }
}

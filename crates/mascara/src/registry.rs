//! Process-wide mask registry.
//!
//! Maps a mask type's stable name to a factory closing over nothing but
//! the [`MaskContext`] it will receive at resolution time. The registry
//! is consulted on every resolution, so it synchronizes internally and
//! callers never lock anything themselves.
//!
//! Registration overwrites: the last factory registered under a name is
//! the one every subsequent lookup observes.

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::components;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::mask::Mask;

/// What a mask factory receives: the exact locator the caller supplied
/// plus a shared driver handle
#[derive(Debug, Clone)]
pub struct MaskContext {
    locator: Locator,
    driver: Arc<dyn Driver>,
}

impl MaskContext {
    /// Create a factory context
    #[must_use]
    pub fn new(locator: Locator, driver: Arc<dyn Driver>) -> Self {
        Self { locator, driver }
    }

    /// The locator the mask is bound to
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Split into the owned locator and driver handle
    #[must_use]
    pub fn into_parts(self) -> (Locator, Arc<dyn Driver>) {
        (self.locator, self.driver)
    }
}

/// Type-erased mask factory stored in the registry
pub type ErasedFactory = Arc<dyn Fn(MaskContext) -> Box<dyn Any + Send> + Send + Sync>;

/// Registry of mask factories keyed by [`Mask::NAME`].
///
/// [`MaskRegistry::new`] pre-seeds the built-in primitives; concurrent
/// registrations and lookups are safe, and a lookup observes the latest
/// registration for its key.
pub struct MaskRegistry {
    masks: RwLock<HashMap<&'static str, ErasedFactory>>,
}

impl MaskRegistry {
    /// Create a registry pre-seeded with the built-in primitives
    #[must_use]
    pub fn new() -> Self {
        let registry = Self::empty();
        components::register_builtins(&registry);
        registry
    }

    /// Create a registry with no factories at all
    #[must_use]
    pub fn empty() -> Self {
        Self {
            masks: RwLock::new(HashMap::new()),
        }
    }

    /// Register a factory for `T`, overwriting any previous one
    pub fn register<T, F>(&self, factory: F)
    where
        T: Mask,
        F: Fn(MaskContext) -> T + Send + Sync + 'static,
    {
        let erased: ErasedFactory =
            Arc::new(move |context| Box::new(factory(context)) as Box<dyn Any + Send>);
        let _ = self.masks.write().insert(T::NAME, erased);
    }

    /// Look up the factory registered under a name
    #[must_use]
    pub fn lookup(&self, type_name: &str) -> Option<ErasedFactory> {
        self.masks.read().get(type_name).cloned()
    }

    /// Check whether a factory is registered under a name
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.masks.read().contains_key(type_name)
    }

    /// Number of registered factories
    #[must_use]
    pub fn count(&self) -> usize {
        self.masks.read().len()
    }

    /// Sorted names of all registered factories
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.masks.read().keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for MaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MaskRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskRegistry")
            .field("masks", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Button, Checkbox, Component, PasswordField, TextArea, TextField};
    use crate::driver::MockDriver;

    fn context(id: &str) -> MaskContext {
        MaskContext::new(Locator::mask_id(id), Arc::new(MockDriver::new()))
    }

    mod seeding_tests {
        use super::*;

        #[test]
        fn test_builtins_are_pre_registered() {
            let registry = MaskRegistry::new();
            for name in [
                TextField::NAME,
                TextArea::NAME,
                PasswordField::NAME,
                Button::NAME,
                Checkbox::NAME,
            ] {
                assert!(registry.contains(name), "missing builtin `{name}`");
            }
            assert_eq!(registry.count(), 5);
        }

        #[test]
        fn test_empty_registry_has_no_builtins() {
            let registry = MaskRegistry::empty();
            assert_eq!(registry.count(), 0);
            assert!(registry.lookup(TextField::NAME).is_none());
        }

        #[test]
        fn test_names_are_sorted() {
            let registry = MaskRegistry::new();
            let names = registry.names();
            let mut sorted = names.clone();
            sorted.sort_unstable();
            assert_eq!(names, sorted);
        }
    }

    mod registration_tests {
        use super::*;

        #[test]
        fn test_factory_receives_exact_locator() {
            let registry = MaskRegistry::new();
            let factory = registry.lookup(Button::NAME).unwrap();

            let instance = (*factory)(context("ok"));
            let button = instance.downcast::<Button>().unwrap();
            assert_eq!(*button.locator(), Locator::mask_id("ok"));
        }

        #[test]
        fn test_reregistration_overwrites() {
            let registry = MaskRegistry::new();
            registry.register(|context: MaskContext| {
                let (locator, driver) = context.into_parts();
                let _ = locator;
                Button::new(MaskContext::new(Locator::mask_id("rebound"), driver))
            });
            assert_eq!(registry.count(), 5);

            let factory = registry.lookup(Button::NAME).unwrap();
            let button = (*factory)(context("ignored")).downcast::<Button>().unwrap();
            assert_eq!(*button.locator(), Locator::mask_id("rebound"));
        }

        #[test]
        fn test_lookup_miss_is_none() {
            let registry = MaskRegistry::new();
            assert!(registry.lookup("no-such-mask").is_none());
        }

        #[test]
        fn test_registration_is_visible_across_threads() {
            let registry = Arc::new(MaskRegistry::empty());

            let writer = Arc::clone(&registry);
            std::thread::spawn(move || {
                writer.register(Button::new);
            })
            .join()
            .unwrap();

            assert!(registry.lookup(Button::NAME).is_some());
        }
    }

    mod context_tests {
        use super::*;

        #[test]
        fn test_context_accessors() {
            let cx = context("panel");
            assert_eq!(*cx.locator(), Locator::mask_id("panel"));

            let (locator, _driver) = cx.into_parts();
            assert_eq!(locator, Locator::mask_id("panel"));
        }
    }
}

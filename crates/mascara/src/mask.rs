//! Mask resolution engine.
//!
//! [`Masquer`] turns a mask type plus an optional locator into a live
//! instance. A type with a registered factory and a locator resolves
//! directly through the factory; everything else is treated as a
//! composite and assembled from its [`Wiring`] descriptor, with nested
//! fields resolved recursively.
//!
//! The order of that decision is part of the contract: a registered
//! primitive resolved without any locator does NOT invoke its factory.
//! It falls through to composite assembly, which for the built-ins fails
//! with [`MascaraError::NotInstantiable`]. Callers wanting a bare
//! primitive must supply a locator.

use std::sync::Arc;

use tracing::{debug, info_span, trace};

use crate::driver::Driver;
use crate::locator::Locator;
use crate::registry::{MaskContext, MaskRegistry};
use crate::result::{MascaraError, MascaraResult};
use crate::wiring::{FieldKind, FieldSpec, Wired, WiredFields, Wiring};

/// A type resolvable by the engine, either through a registered factory
/// or by composite assembly.
///
/// # Example
///
/// ```
/// use mascara::prelude::*;
///
/// struct LoginForm {
///     username: TextField,
///     submit: Button,
/// }
///
/// impl Mask for LoginForm {
///     const NAME: &'static str = "login-form";
///
///     fn wiring() -> Wiring<Self> {
///         Wiring::new()
///             .rooted_at(&["login-form"])
///             .mask::<TextField>("username")
///             .mask_at::<Button>("submit", &["actions", "submit"])
///             .assemble(|fields| {
///                 Ok(Self {
///                     username: fields.take("username")?,
///                     submit: fields.take("submit")?,
///                 })
///             })
///     }
/// }
/// ```
pub trait Mask: Sized + Send + 'static {
    /// Stable identifier used as the registry key
    const NAME: &'static str;

    /// Wiring descriptor consulted when the type is assembled as a
    /// composite. The default descriptor has no constructor, which is
    /// right for primitives that only ever resolve through a factory.
    fn wiring() -> Wiring<Self> {
        Wiring::new()
    }
}

/// Resolution engine binding mask types to located elements.
///
/// Holds shared ownership of the registry and the driver; cloning is
/// cheap and clones observe the same registry.
#[derive(Debug, Clone)]
pub struct Masquer {
    registry: Arc<MaskRegistry>,
    driver: Arc<dyn Driver>,
}

impl Masquer {
    /// Create an engine with a freshly seeded registry
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self::with_registry(driver, Arc::new(MaskRegistry::new()))
    }

    /// Create an engine over an existing registry
    #[must_use]
    pub fn with_registry(driver: Arc<dyn Driver>, registry: Arc<MaskRegistry>) -> Self {
        Self { registry, driver }
    }

    /// The engine's registry
    #[must_use]
    pub const fn registry(&self) -> &Arc<MaskRegistry> {
        &self.registry
    }

    /// Register a factory for `T`, overwriting any previous one
    pub fn register<T, F>(&self, factory: F)
    where
        T: Mask,
        F: Fn(MaskContext) -> T + Send + Sync + 'static,
    {
        self.registry.register::<T, F>(factory);
    }

    /// Begin resolution against an explicit locator
    #[must_use]
    pub const fn mask(&self, locator: Locator) -> MaskHandle<'_> {
        MaskHandle {
            masquer: self,
            locator,
        }
    }

    /// Begin resolution against a single stable identifier
    #[must_use]
    pub fn mask_id(&self, id: impl Into<String>) -> MaskHandle<'_> {
        self.mask(Locator::mask_id(id))
    }

    /// Resolve a mask with no locator.
    ///
    /// The type is assembled as a composite, scoped by its own
    /// `rooted_at` path if it declares one.
    ///
    /// # Errors
    ///
    /// Returns [`MascaraError::NotInstantiable`] for a type without a
    /// constructor, or any error raised while wiring its fields.
    pub fn resolve<T: Mask>(&self) -> MascaraResult<T> {
        self.resolve_scoped(None)
    }

    pub(crate) fn resolve_scoped<T: Mask>(&self, context: Option<Locator>) -> MascaraResult<T> {
        if let Some(locator) = &context {
            if let Some(factory) = self.registry.lookup(T::NAME) {
                debug!(mask = T::NAME, locator = %locator, "resolving registered mask");
                let instance = (*factory)(MaskContext::new(
                    locator.clone(),
                    Arc::clone(&self.driver),
                ));
                return match instance.downcast::<T>() {
                    Ok(mask) => Ok(*mask),
                    Err(_) => Err(MascaraError::Factory { type_name: T::NAME }),
                };
            }
        }
        self.assemble::<T>(context)
    }

    fn assemble<T: Mask>(&self, context: Option<Locator>) -> MascaraResult<T> {
        let (root, fields, construct) = T::wiring().into_parts();
        let Some(construct) = construct else {
            return Err(MascaraError::NotInstantiable { type_name: T::NAME });
        };

        let effective = match context {
            Some(locator) => Some(locator),
            None => match root {
                Some(path) => Some(Locator::from_path(&path)?),
                None => None,
            },
        };

        debug!(mask = T::NAME, fields = fields.len(), "assembling composite mask");
        let mut wired = WiredFields::new(T::NAME);
        for field in &fields {
            let value = self.wire_field(T::NAME, field, effective.as_ref())?;
            wired.insert(field.name, value);
        }
        construct(&mut wired)
    }

    fn wire_field(
        &self,
        type_name: &'static str,
        field: &FieldSpec,
        effective: Option<&Locator>,
    ) -> MascaraResult<Wired> {
        trace!(mask = type_name, field = field.name, "wiring field");
        match &field.kind {
            FieldKind::Nested(resolve) => {
                let own = if field.path.is_empty() {
                    Locator::mask_id(field.name)
                } else {
                    Locator::from_path(&field.path)?
                };
                let locator = match effective {
                    Some(parent) => own.within(parent.clone()),
                    None => own,
                };
                resolve(self, Some(locator)).map(Wired::Mask)
            }
            FieldKind::Element => {
                let locator = Self::hatch_locator(field, effective)?;
                self.driver.resolve(&locator).map(Wired::Element)
            }
            FieldKind::Locator => Self::hatch_locator(field, effective).map(Wired::Locator),
            FieldKind::Span => Ok(Wired::Span(
                info_span!("mask", mask = type_name, field = field.name),
            )),
        }
    }

    /// Locator for an escape-hatch field: the effective locator (or the
    /// document root) when no path is declared, otherwise the path scoped
    /// under the effective locator like a nested field
    fn hatch_locator(field: &FieldSpec, effective: Option<&Locator>) -> MascaraResult<Locator> {
        if field.path.is_empty() {
            return Ok(effective.cloned().unwrap_or_else(Locator::root));
        }
        let own = Locator::from_path(&field.path)?;
        Ok(match effective {
            Some(parent) => own.within(parent.clone()),
            None => own,
        })
    }
}

/// Pending resolution bound to a locator; complete it with
/// [`MaskHandle::with`]
#[derive(Debug, Clone)]
#[must_use = "a mask handle does nothing until resolved with `with`"]
pub struct MaskHandle<'a> {
    masquer: &'a Masquer,
    locator: Locator,
}

impl MaskHandle<'_> {
    /// The locator this handle resolves against
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Complete resolution for the target type
    ///
    /// # Errors
    ///
    /// Returns a factory, assembly or driver error, depending on which
    /// branch the resolution takes.
    pub fn with<T: Mask>(self) -> MascaraResult<T> {
        let Self { masquer, locator } = self;
        masquer.resolve_scoped(Some(locator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Button, Component, TextField};
    use crate::driver::MockDriver;

    fn masquer() -> (Arc<MockDriver>, Masquer) {
        let driver = Arc::new(MockDriver::new());
        let masquer = Masquer::new(Arc::clone(&driver) as Arc<dyn Driver>);
        (driver, masquer)
    }

    mod primitive_tests {
        use super::*;

        #[test]
        fn test_primitive_with_locator_uses_factory() {
            let (_, masquer) = masquer();
            let locator = Locator::mask_id("ok");
            let button: Button = masquer.mask(locator.clone()).with().unwrap();
            assert_eq!(*button.locator(), locator);
        }

        #[test]
        fn test_mask_id_shorthand() {
            let (_, masquer) = masquer();
            let field: TextField = masquer.mask_id("username").with().unwrap();
            assert_eq!(*field.locator(), Locator::mask_id("username"));
        }

        #[test]
        fn test_primitive_without_locator_is_not_instantiable() {
            let (_, masquer) = masquer();
            let err = masquer.resolve::<Button>().unwrap_err();
            match err {
                MascaraError::NotInstantiable { type_name } => {
                    assert_eq!(type_name, Button::NAME);
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_resolution_produces_independent_instances() {
            let (_, masquer) = masquer();
            let first: Button = masquer.mask_id("ok").with().unwrap();
            let second: Button = masquer.mask_id("ok").with().unwrap();
            assert_eq!(first.locator(), second.locator());
        }
    }

    mod registration_tests {
        use super::*;

        struct Probe {
            locator: Locator,
        }

        impl Mask for Probe {
            const NAME: &'static str = "probe";
        }

        #[test]
        fn test_registered_mask_is_resolvable_immediately() {
            let (_, masquer) = masquer();
            masquer.register(|context: MaskContext| Probe {
                locator: context.into_parts().0,
            });

            let probe: Probe = masquer.mask_id("anywhere").with().unwrap();
            assert_eq!(probe.locator, Locator::mask_id("anywhere"));
        }

        struct Impostor;

        // Collides with the built-in button's registry key on purpose.
        impl Mask for Impostor {
            const NAME: &'static str = "button";
        }

        #[test]
        fn test_factory_type_mismatch_is_surfaced() {
            let (_, masquer) = masquer();
            let err = masquer.mask_id("ok").with::<Impostor>().unwrap_err();
            assert!(matches!(err, MascaraError::Factory { type_name: "button" }));
        }
    }

    mod composite_tests {
        use super::*;

        struct Pager {
            next: Button,
            scope: Locator,
        }

        impl Mask for Pager {
            const NAME: &'static str = "pager";

            fn wiring() -> Wiring<Self> {
                Wiring::new()
                    .rooted_at(&["pager"])
                    .mask::<Button>("next")
                    .locator("scope")
                    .assemble(|fields| {
                        Ok(Self {
                            next: fields.take("next")?,
                            scope: fields.take_locator("scope")?,
                        })
                    })
            }
        }

        #[test]
        fn test_composite_without_locator_uses_rooted_path() {
            let (_, masquer) = masquer();
            let pager: Pager = masquer.resolve().unwrap();

            let root = Locator::from_path(["pager"]).unwrap();
            assert_eq!(pager.scope, root);
            assert_eq!(
                *pager.next.locator(),
                Locator::mask_id("next").within(root)
            );
        }

        #[test]
        fn test_composite_with_locator_ignores_rooted_path() {
            let (_, masquer) = masquer();
            let scope = Locator::by(crate::locator::Selector::css("#paging"));
            let pager: Pager = masquer.mask(scope.clone()).with().unwrap();

            assert_eq!(pager.scope, scope);
            assert_eq!(
                *pager.next.locator(),
                Locator::mask_id("next").within(scope)
            );
        }
    }
}

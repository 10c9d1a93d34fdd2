//! Built-in primitive mask components.
//!
//! Each component owns the locator it was resolved at and a shared
//! driver handle. Operations resolve a fresh element through the driver
//! every time; nothing is cached between test steps.

use std::sync::Arc;

use crate::driver::{Driver, Element};
use crate::locator::Locator;
use crate::mask::Mask;
use crate::registry::{MaskContext, MaskRegistry};
use crate::result::MascaraResult;

/// Base behavior of every mask component: it is bound to exactly one
/// locator for its lifetime
pub trait Component {
    /// The locator this component is bound to
    fn locator(&self) -> &Locator;
}

/// Seed the five built-in primitives into a registry.
pub(crate) fn register_builtins(registry: &MaskRegistry) {
    registry.register(TextField::new);
    registry.register(TextArea::new);
    registry.register(PasswordField::new);
    registry.register(Button::new);
    registry.register(Checkbox::new);
}

/// Single-line text input
#[derive(Debug, Clone)]
pub struct TextField {
    locator: Locator,
    driver: Arc<dyn Driver>,
}

impl TextField {
    pub(crate) fn new(context: MaskContext) -> Self {
        let (locator, driver) = context.into_parts();
        Self { locator, driver }
    }

    fn element(&self) -> MascaraResult<Box<dyn Element>> {
        self.driver.resolve(&self.locator)
    }

    /// Replace the field's value
    ///
    /// # Errors
    ///
    /// Propagates driver lookup and interaction failures
    pub fn set_value(&self, value: &str) -> MascaraResult<()> {
        let element = self.element()?;
        element.clear()?;
        element.type_text(value)
    }

    /// The field's current value
    ///
    /// # Errors
    ///
    /// Propagates driver lookup failures
    pub fn value(&self) -> MascaraResult<String> {
        self.element()?.value()
    }

    /// Whether the field accepts input
    ///
    /// # Errors
    ///
    /// Propagates driver lookup failures
    pub fn is_enabled(&self) -> MascaraResult<bool> {
        self.element()?.is_enabled()
    }
}

impl Mask for TextField {
    const NAME: &'static str = "text-field";
}

impl Component for TextField {
    fn locator(&self) -> &Locator {
        &self.locator
    }
}

/// Multi-line text input
#[derive(Debug, Clone)]
pub struct TextArea {
    locator: Locator,
    driver: Arc<dyn Driver>,
}

impl TextArea {
    pub(crate) fn new(context: MaskContext) -> Self {
        let (locator, driver) = context.into_parts();
        Self { locator, driver }
    }

    fn element(&self) -> MascaraResult<Box<dyn Element>> {
        self.driver.resolve(&self.locator)
    }

    /// Replace the area's value
    ///
    /// # Errors
    ///
    /// Propagates driver lookup and interaction failures
    pub fn set_value(&self, value: &str) -> MascaraResult<()> {
        let element = self.element()?;
        element.clear()?;
        element.type_text(value)
    }

    /// The area's current value
    ///
    /// # Errors
    ///
    /// Propagates driver lookup failures
    pub fn value(&self) -> MascaraResult<String> {
        self.element()?.value()
    }

    /// Whether the area accepts input
    ///
    /// # Errors
    ///
    /// Propagates driver lookup failures
    pub fn is_enabled(&self) -> MascaraResult<bool> {
        self.element()?.is_enabled()
    }
}

impl Mask for TextArea {
    const NAME: &'static str = "text-area";
}

impl Component for TextArea {
    fn locator(&self) -> &Locator {
        &self.locator
    }
}

/// Masked text input for secrets
#[derive(Debug, Clone)]
pub struct PasswordField {
    locator: Locator,
    driver: Arc<dyn Driver>,
}

impl PasswordField {
    pub(crate) fn new(context: MaskContext) -> Self {
        let (locator, driver) = context.into_parts();
        Self { locator, driver }
    }

    fn element(&self) -> MascaraResult<Box<dyn Element>> {
        self.driver.resolve(&self.locator)
    }

    /// Replace the field's value
    ///
    /// # Errors
    ///
    /// Propagates driver lookup and interaction failures
    pub fn set_value(&self, value: &str) -> MascaraResult<()> {
        let element = self.element()?;
        element.clear()?;
        element.type_text(value)
    }

    /// The field's current value
    ///
    /// # Errors
    ///
    /// Propagates driver lookup failures
    pub fn value(&self) -> MascaraResult<String> {
        self.element()?.value()
    }

    /// Whether the field accepts input
    ///
    /// # Errors
    ///
    /// Propagates driver lookup failures
    pub fn is_enabled(&self) -> MascaraResult<bool> {
        self.element()?.is_enabled()
    }
}

impl Mask for PasswordField {
    const NAME: &'static str = "password-field";
}

impl Component for PasswordField {
    fn locator(&self) -> &Locator {
        &self.locator
    }
}

/// Clickable button
#[derive(Debug, Clone)]
pub struct Button {
    locator: Locator,
    driver: Arc<dyn Driver>,
}

impl Button {
    pub(crate) fn new(context: MaskContext) -> Self {
        let (locator, driver) = context.into_parts();
        Self { locator, driver }
    }

    fn element(&self) -> MascaraResult<Box<dyn Element>> {
        self.driver.resolve(&self.locator)
    }

    /// Click the button
    ///
    /// # Errors
    ///
    /// Propagates driver lookup and interaction failures
    pub fn click(&self) -> MascaraResult<()> {
        self.element()?.click()
    }

    /// The button's caption
    ///
    /// # Errors
    ///
    /// Propagates driver lookup failures
    pub fn caption(&self) -> MascaraResult<String> {
        self.element()?.text()
    }

    /// Whether the button accepts clicks
    ///
    /// # Errors
    ///
    /// Propagates driver lookup failures
    pub fn is_enabled(&self) -> MascaraResult<bool> {
        self.element()?.is_enabled()
    }
}

impl Mask for Button {
    const NAME: &'static str = "button";
}

impl Component for Button {
    fn locator(&self) -> &Locator {
        &self.locator
    }
}

/// Two-state checkbox
#[derive(Debug, Clone)]
pub struct Checkbox {
    locator: Locator,
    driver: Arc<dyn Driver>,
}

impl Checkbox {
    pub(crate) fn new(context: MaskContext) -> Self {
        let (locator, driver) = context.into_parts();
        Self { locator, driver }
    }

    fn element(&self) -> MascaraResult<Box<dyn Element>> {
        self.driver.resolve(&self.locator)
    }

    /// Whether the checkbox is checked
    ///
    /// # Errors
    ///
    /// Propagates driver lookup failures
    pub fn is_checked(&self) -> MascaraResult<bool> {
        self.element()?.is_selected()
    }

    /// Flip the checkbox
    ///
    /// # Errors
    ///
    /// Propagates driver lookup and interaction failures
    pub fn toggle(&self) -> MascaraResult<()> {
        self.element()?.click()
    }

    /// Drive the checkbox to the requested state, clicking only when it
    /// differs
    ///
    /// # Errors
    ///
    /// Propagates driver lookup and interaction failures
    pub fn set_checked(&self, checked: bool) -> MascaraResult<()> {
        if self.is_checked()? == checked {
            Ok(())
        } else {
            self.toggle()
        }
    }
}

impl Mask for Checkbox {
    const NAME: &'static str = "checkbox";
}

impl Component for Checkbox {
    fn locator(&self) -> &Locator {
        &self.locator
    }
}

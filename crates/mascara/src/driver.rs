//! Driver contract for element lookup and interaction.
//!
//! The resolution engine never talks to a browser directly. It hands a
//! [`Locator`] to a [`Driver`] and gets back a live [`Element`] handle.
//! Nothing is cached: every operation resolves afresh, and lookup
//! failures are propagated to the caller unchanged.
//!
//! [`MockDriver`] is the in-memory implementation used by this crate's
//! own tests and by test authors who want to exercise mask wiring
//! without a browser.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::locator::Locator;
use crate::result::{MascaraError, MascaraResult};

/// A live element handle produced by a driver.
///
/// Handles are short-lived; masks resolve a new one for every operation.
pub trait Element: fmt::Debug + Send {
    /// Click the element
    ///
    /// # Errors
    ///
    /// Returns a driver-defined error if the element is not clickable
    fn click(&self) -> MascaraResult<()>;

    /// Clear the element's value
    ///
    /// # Errors
    ///
    /// Returns a driver-defined error if the element is not editable
    fn clear(&self) -> MascaraResult<()>;

    /// Type text into the element
    ///
    /// # Errors
    ///
    /// Returns a driver-defined error if the element is not editable
    fn type_text(&self, text: &str) -> MascaraResult<()>;

    /// The element's text content
    ///
    /// # Errors
    ///
    /// Returns a driver-defined error if the element is gone
    fn text(&self) -> MascaraResult<String>;

    /// The element's current value
    ///
    /// # Errors
    ///
    /// Returns a driver-defined error if the element is gone
    fn value(&self) -> MascaraResult<String>;

    /// Whether the element is selected or checked
    ///
    /// # Errors
    ///
    /// Returns a driver-defined error if the element is gone
    fn is_selected(&self) -> MascaraResult<bool>;

    /// Whether the element accepts interaction
    ///
    /// # Errors
    ///
    /// Returns a driver-defined error if the element is gone
    fn is_enabled(&self) -> MascaraResult<bool>;
}

/// Abstract driver trait for element lookup.
///
/// Implementations may block while waiting for an element to appear;
/// any such timing policy belongs to the driver, not to the engine.
pub trait Driver: fmt::Debug + Send + Sync {
    /// Resolve a locator to a live element handle
    ///
    /// # Errors
    ///
    /// Returns [`MascaraError::ElementNotFound`], [`MascaraError::Timeout`]
    /// or [`MascaraError::Driver`] when nothing matches
    fn resolve(&self, locator: &Locator) -> MascaraResult<Box<dyn Element>>;
}

/// Observable state behind a [`MockElement`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementState {
    /// Text content
    pub text: String,
    /// Current value
    pub value: String,
    /// Selected / checked flag
    pub selected: bool,
    /// Whether interaction is accepted
    pub enabled: bool,
    /// Number of clicks received
    pub clicks: u32,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            text: String::new(),
            value: String::new(),
            selected: false,
            enabled: true,
            clicks: 0,
        }
    }
}

/// Mock element sharing its state with the staging test.
///
/// Cloning yields another handle onto the same state, so a test can keep
/// one handle for assertions while the mask interacts through the driver.
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    state: Arc<Mutex<ElementState>>,
}

impl MockElement {
    /// Create a mock element with default state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the staged text content
    pub fn set_text(&self, text: impl Into<String>) {
        self.state.lock().text = text.into();
    }

    /// Set the staged value
    pub fn set_value(&self, value: impl Into<String>) {
        self.state.lock().value = value.into();
    }

    /// Set the staged selected flag
    pub fn set_selected(&self, selected: bool) {
        self.state.lock().selected = selected;
    }

    /// Set the staged enabled flag
    pub fn set_enabled(&self, enabled: bool) {
        self.state.lock().enabled = enabled;
    }

    /// Snapshot the current state for assertions
    #[must_use]
    pub fn snapshot(&self) -> ElementState {
        self.state.lock().clone()
    }
}

impl Element for MockElement {
    fn click(&self) -> MascaraResult<()> {
        let mut state = self.state.lock();
        if !state.enabled {
            return Err(MascaraError::Driver {
                message: "element is disabled".to_string(),
            });
        }
        state.clicks += 1;
        state.selected = !state.selected;
        Ok(())
    }

    fn clear(&self) -> MascaraResult<()> {
        self.state.lock().value.clear();
        Ok(())
    }

    fn type_text(&self, text: &str) -> MascaraResult<()> {
        let mut state = self.state.lock();
        if !state.enabled {
            return Err(MascaraError::Driver {
                message: "element is disabled".to_string(),
            });
        }
        state.value.push_str(text);
        Ok(())
    }

    fn text(&self) -> MascaraResult<String> {
        Ok(self.state.lock().text.clone())
    }

    fn value(&self) -> MascaraResult<String> {
        Ok(self.state.lock().value.clone())
    }

    fn is_selected(&self) -> MascaraResult<bool> {
        Ok(self.state.lock().selected)
    }

    fn is_enabled(&self) -> MascaraResult<bool> {
        Ok(self.state.lock().enabled)
    }
}

/// Mock driver for unit testing.
///
/// Elements are staged under the rendered form of their locator, so two
/// locators that print the same resolve to the same element. Every
/// resolution is recorded for verification.
#[derive(Debug, Default)]
pub struct MockDriver {
    elements: Mutex<HashMap<String, MockElement>>,
    resolutions: Mutex<Vec<String>>,
}

impl MockDriver {
    /// Create a new mock driver with no staged elements
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an element at a locator, returning a handle onto its state
    pub fn stage(&self, locator: &Locator) -> MockElement {
        let element = MockElement::new();
        let _ = self
            .elements
            .lock()
            .insert(locator.to_string(), element.clone());
        element
    }

    /// Rendered locators resolved so far, in order
    #[must_use]
    pub fn resolutions(&self) -> Vec<String> {
        self.resolutions.lock().clone()
    }

    /// Number of resolutions performed
    #[must_use]
    pub fn resolution_count(&self) -> usize {
        self.resolutions.lock().len()
    }

    /// Check whether a locator was resolved
    #[must_use]
    pub fn was_resolved(&self, locator: &Locator) -> bool {
        let key = locator.to_string();
        self.resolutions.lock().iter().any(|r| *r == key)
    }
}

impl Driver for MockDriver {
    fn resolve(&self, locator: &Locator) -> MascaraResult<Box<dyn Element>> {
        let key = locator.to_string();
        self.resolutions.lock().push(key.clone());
        self.elements
            .lock()
            .get(&key)
            .cloned()
            .map(|element| Box::new(element) as Box<dyn Element>)
            .ok_or(MascaraError::ElementNotFound { locator: key })
    }
}

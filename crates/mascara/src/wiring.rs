//! Declarative wiring descriptors for composite masks.
//!
//! A composite mask type describes its nested fields with a [`Wiring`]
//! descriptor instead of annotations and reflection: each entry names a
//! field, optionally gives it a locator path, and says what kind of value
//! it receives. The resolution engine consumes the descriptor, resolves
//! every field, and hands the results to the descriptor's constructor as
//! a [`WiredFields`] bag.
//!
//! Three escape hatches bypass recursive mask resolution: a field can
//! receive the live element at the composite's own locator, the locator
//! value itself, or a [`tracing::Span`] scoped to the composite's type.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use tracing::Span;

use crate::driver::Element;
use crate::locator::Locator;
use crate::mask::{Mask, Masquer};
use crate::result::{MascaraError, MascaraResult};

/// Resolves a nested mask field through the engine, erased so that
/// descriptors of different field types share one representation
pub(crate) type NestedResolver =
    fn(&Masquer, Option<Locator>) -> MascaraResult<Box<dyn Any + Send>>;

type AssembleFn<T> = Box<dyn Fn(&mut WiredFields) -> MascaraResult<T> + Send + Sync>;

fn resolve_nested<F: Mask>(
    masquer: &Masquer,
    locator: Option<Locator>,
) -> MascaraResult<Box<dyn Any + Send>> {
    masquer
        .resolve_scoped::<F>(locator)
        .map(|mask| Box::new(mask) as Box<dyn Any + Send>)
}

/// How a declared field obtains its value
#[derive(Debug)]
pub(crate) enum FieldKind {
    /// Recursive mask resolution
    Nested(NestedResolver),
    /// Live element handle at the computed locator
    Element,
    /// The computed locator itself, no driver call
    Locator,
    /// Diagnostic span scoped to the composite's type
    Span,
}

/// One declared field of a composite mask
#[derive(Debug)]
pub(crate) struct FieldSpec {
    pub(crate) name: &'static str,
    /// Empty means "use the field's own name as the path"
    pub(crate) path: Vec<String>,
    pub(crate) kind: FieldKind,
}

/// Wiring descriptor for a composite mask type.
///
/// Built fluently and returned from [`Mask::wiring`]. A descriptor
/// without an [`assemble`](Wiring::assemble) constructor cannot be
/// resolved as a composite.
pub struct Wiring<T> {
    root: Option<Vec<String>>,
    fields: Vec<FieldSpec>,
    assemble: Option<AssembleFn<T>>,
}

impl<T: Mask> Wiring<T> {
    /// Create an empty descriptor
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: None,
            fields: Vec::new(),
            assemble: None,
        }
    }

    /// Declare the type-level locator path, used when the composite is
    /// resolved without a context locator
    #[must_use]
    pub fn rooted_at(mut self, path: &[&str]) -> Self {
        self.root = Some(path.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Declare a nested mask field located by its own name
    #[must_use]
    pub fn mask<F: Mask>(self, name: &'static str) -> Self {
        self.push(name, Vec::new(), FieldKind::Nested(resolve_nested::<F>))
    }

    /// Declare a nested mask field with an explicit locator path
    #[must_use]
    pub fn mask_at<F: Mask>(self, name: &'static str, path: &[&str]) -> Self {
        self.push(name, owned(path), FieldKind::Nested(resolve_nested::<F>))
    }

    /// Declare a field receiving the live element at the composite's own
    /// locator (document root when the composite has none)
    #[must_use]
    pub fn element(self, name: &'static str) -> Self {
        self.push(name, Vec::new(), FieldKind::Element)
    }

    /// Declare a field receiving the live element at an explicit path
    /// scoped under the composite
    #[must_use]
    pub fn element_at(self, name: &'static str, path: &[&str]) -> Self {
        self.push(name, owned(path), FieldKind::Element)
    }

    /// Declare a field receiving the composite's own locator value
    #[must_use]
    pub fn locator(self, name: &'static str) -> Self {
        self.push(name, Vec::new(), FieldKind::Locator)
    }

    /// Declare a field receiving the locator for an explicit path scoped
    /// under the composite, with no driver call
    #[must_use]
    pub fn locator_at(self, name: &'static str, path: &[&str]) -> Self {
        self.push(name, owned(path), FieldKind::Locator)
    }

    /// Declare a field receiving a diagnostic span scoped to the
    /// composite's type
    #[must_use]
    pub fn span(self, name: &'static str) -> Self {
        self.push(name, Vec::new(), FieldKind::Span)
    }

    /// Provide the constructor invoked with the fully wired fields
    #[must_use]
    pub fn assemble<F>(mut self, construct: F) -> Self
    where
        F: Fn(&mut WiredFields) -> MascaraResult<T> + Send + Sync + 'static,
    {
        self.assemble = Some(Box::new(construct));
        self
    }

    fn push(mut self, name: &'static str, path: Vec<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec { name, path, kind });
        self
    }

    pub(crate) fn into_parts(
        self,
    ) -> (Option<Vec<String>>, Vec<FieldSpec>, Option<AssembleFn<T>>) {
        (self.root, self.fields, self.assemble)
    }
}

impl<T: Mask> Default for Wiring<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Mask> fmt::Debug for Wiring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wiring")
            .field("mask", &T::NAME)
            .field("root", &self.root)
            .field("fields", &self.fields)
            .field("constructible", &self.assemble.is_some())
            .finish()
    }
}

fn owned(path: &[&str]) -> Vec<String> {
    path.iter().map(|s| (*s).to_string()).collect()
}

/// A resolved field value awaiting assembly
pub(crate) enum Wired {
    Mask(Box<dyn Any + Send>),
    Element(Box<dyn Element>),
    Locator(Locator),
    Span(Span),
}

impl Wired {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Mask(_) => "a nested mask",
            Self::Element(_) => "an element handle",
            Self::Locator(_) => "a locator",
            Self::Span(_) => "a span",
        }
    }
}

impl fmt::Debug for Wired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Named bag of resolved field values handed to a composite's
/// constructor.
///
/// Every `take_*` call removes the value; asking for a name that was
/// never declared, or with the wrong type, fails with the offending
/// field's name.
#[derive(Debug)]
pub struct WiredFields {
    type_name: &'static str,
    values: HashMap<&'static str, Wired>,
}

impl WiredFields {
    pub(crate) fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            values: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: &'static str, value: Wired) {
        let _ = self.values.insert(name, value);
    }

    /// Take a nested mask field
    ///
    /// # Errors
    ///
    /// Returns [`MascaraError::Wiring`] if the field is missing or holds
    /// a different type
    pub fn take<F: Mask>(&mut self, name: &str) -> MascaraResult<F> {
        match self.values.remove(name) {
            Some(Wired::Mask(any)) => any.downcast::<F>().map(|mask| *mask).map_err(|_| {
                self.error(name, format!("field does not hold a `{}` mask", F::NAME))
            }),
            Some(other) => Err(self.mismatch(name, other.kind(), "a nested mask")),
            None => Err(self.missing(name)),
        }
    }

    /// Take a live element field
    ///
    /// # Errors
    ///
    /// Returns [`MascaraError::Wiring`] if the field is missing or holds
    /// a different type
    pub fn take_element(&mut self, name: &str) -> MascaraResult<Box<dyn Element>> {
        match self.values.remove(name) {
            Some(Wired::Element(element)) => Ok(element),
            Some(other) => Err(self.mismatch(name, other.kind(), "an element handle")),
            None => Err(self.missing(name)),
        }
    }

    /// Take a locator field
    ///
    /// # Errors
    ///
    /// Returns [`MascaraError::Wiring`] if the field is missing or holds
    /// a different type
    pub fn take_locator(&mut self, name: &str) -> MascaraResult<Locator> {
        match self.values.remove(name) {
            Some(Wired::Locator(locator)) => Ok(locator),
            Some(other) => Err(self.mismatch(name, other.kind(), "a locator")),
            None => Err(self.missing(name)),
        }
    }

    /// Take a diagnostic span field
    ///
    /// # Errors
    ///
    /// Returns [`MascaraError::Wiring`] if the field is missing or holds
    /// a different type
    pub fn take_span(&mut self, name: &str) -> MascaraResult<Span> {
        match self.values.remove(name) {
            Some(Wired::Span(span)) => Ok(span),
            Some(other) => Err(self.mismatch(name, other.kind(), "a span")),
            None => Err(self.missing(name)),
        }
    }

    fn error(&self, field: &str, message: impl Into<String>) -> MascaraError {
        MascaraError::Wiring {
            type_name: self.type_name,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn mismatch(&self, field: &str, held: &str, wanted: &str) -> MascaraError {
        self.error(field, format!("field holds {held} where {wanted} was requested"))
    }

    fn missing(&self, field: &str) -> MascaraError {
        self.error(field, "field was never wired")
    }
}

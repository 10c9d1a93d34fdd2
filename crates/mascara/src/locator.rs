//! Locator values for element selection.
//!
//! A [`Locator`] is an immutable, composable description of where to find
//! an element within a scope. It is either a single [`Selector`] strategy
//! or a chain of two locators, where the child is searched within the
//! parent's matches. Composition never mutates; it always produces a new
//! value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::result::{MascaraError, MascaraResult};

/// Attribute carrying the stable identifier that [`Selector::MaskId`]
/// matches against
pub const MASK_ID_ATTRIBUTE: &str = "data-mask-id";

/// Selector strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Text content selector
    Text(String),
    /// Tag name selector
    TagName(String),
    /// Stable identifier selector (`data-mask-id` attribute)
    MaskId(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a tag name selector
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self::TagName(name.into())
    }

    /// Create a stable identifier selector
    #[must_use]
    pub fn mask_id(id: impl Into<String>) -> Self {
        Self::MaskId(id.into())
    }

    /// Convert to a JavaScript query expression
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
            Self::Text(t) => {
                format!("Array.from(document.querySelectorAll('*')).find(el => el.textContent.includes({t:?}))")
            }
            Self::TagName(t) => format!("document.getElementsByTagName({t:?})[0]"),
            Self::MaskId(id) => format!("document.querySelector('[{MASK_ID_ATTRIBUTE}={id:?}]')"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css({s})"),
            Self::XPath(s) => write!(f, "xpath({s})"),
            Self::Text(s) => write!(f, "text({s})"),
            Self::TagName(s) => write!(f, "tag({s})"),
            Self::MaskId(s) => write!(f, "mask-id({s})"),
        }
    }
}

/// An immutable locator: a selector strategy, or a scoped chain of two
/// locators.
///
/// A chained locator evaluates the parent first, then the child relative
/// to the parent's matches. Chains nest freely; no flattening is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locator {
    /// Locate by a single selector strategy
    By(Selector),
    /// Locate the child within the parent's matches
    Within {
        /// Outer scope, evaluated first
        parent: Box<Locator>,
        /// Inner locator, evaluated relative to the parent
        child: Box<Locator>,
    },
}

impl Locator {
    /// Create a locator from a selector strategy
    #[must_use]
    pub const fn by(selector: Selector) -> Self {
        Self::By(selector)
    }

    /// Create a locator for a single stable identifier
    #[must_use]
    pub fn mask_id(id: impl Into<String>) -> Self {
        Self::By(Selector::MaskId(id.into()))
    }

    /// Build a locator from an ordered path of stable identifiers.
    ///
    /// Each segment maps to the [`Selector::MaskId`] strategy and the
    /// segments are folded left into nested [`Locator::Within`] chains, so
    /// `["a", "b"]` means "`b` within `a`'s matches".
    ///
    /// # Errors
    ///
    /// Returns [`MascaraError::EmptyPath`] when the path has no segments.
    pub fn from_path<I, S>(segments: I) -> MascaraResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut locator: Option<Self> = None;
        for segment in segments {
            let next = Self::mask_id(segment.as_ref());
            locator = Some(match locator {
                Some(parent) => next.within(parent),
                None => next,
            });
        }
        locator.ok_or(MascaraError::EmptyPath)
    }

    /// Scope this locator within a parent, searching it among the
    /// parent's matches
    #[must_use]
    pub fn within(self, parent: Self) -> Self {
        Self::Within {
            parent: Box::new(parent),
            child: Box::new(self),
        }
    }

    /// The document-root fallback locator
    #[must_use]
    pub fn root() -> Self {
        Self::By(Selector::tag("body"))
    }

    /// Whether this locator is a scoped chain
    #[must_use]
    pub const fn is_scoped(&self) -> bool {
        matches!(self, Self::Within { .. })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::By(selector) => fmt::Display::fmt(selector, f),
            Self::Within { parent, child } => write!(f, "{parent} >> {child}"),
        }
    }
}

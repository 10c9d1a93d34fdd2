//! Result and error types for Mascara.

use thiserror::Error;

/// Result type for Mascara operations
pub type MascaraResult<T> = Result<T, MascaraError>;

/// Errors that can occur while resolving and wiring masks
#[derive(Debug, Error)]
pub enum MascaraError {
    /// A locator path was built from an empty segment sequence
    #[error("locator path requires at least one segment")]
    EmptyPath,

    /// A composite mask type declares no constructor
    #[error("mask type `{type_name}` declares no constructor and cannot be assembled as a composite")]
    NotInstantiable {
        /// Registry key of the offending type
        type_name: &'static str,
    },

    /// A wired value could not be stored into its target field
    #[error("unable to wire field `{field}` of `{type_name}`: {message}")]
    Wiring {
        /// Registry key of the composite being assembled
        type_name: &'static str,
        /// Name of the offending field
        field: String,
        /// What went wrong
        message: String,
    },

    /// A registered factory produced a value of the wrong type
    #[error("registered factory for `{type_name}` produced a different type")]
    Factory {
        /// Registry key the factory was registered under
        type_name: &'static str,
    },

    /// The driver found no element for a locator
    #[error("no element matches {locator}")]
    ElementNotFound {
        /// Rendered form of the locator that failed
        locator: String,
    },

    /// The driver gave up waiting for an element
    #[error("element lookup timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Driver-defined failure
    #[error("driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },
}

//! Mascara: declarative page-object masks for browser UI tests.
//!
//! Mascara (Spanish: "máscara", a mask) binds abstract component types
//! to located elements in a rendered page. A test asks for a typed mask
//! at a locator; the engine either invokes a registered factory for a
//! primitive, or assembles a composite by recursively wiring the fields
//! its descriptor declares.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        MASCARA Resolution                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  ┌───────────┐    ┌──────────────┐    ┌──────────────────────┐   │
//! │  │  Masquer  │───►│ MaskRegistry │───►│ factory(MaskContext) │   │
//! │  │  (engine) │    │   (lookup)   │    │ primitive, terminal  │   │
//! │  └─────┬─────┘    └──────────────┘    └──────────────────────┘   │
//! │        │ miss, or no locator                                     │
//! │        ▼                                                         │
//! │  ┌───────────┐    per nested field    ┌──────────────────────┐   │
//! │  │  Wiring   │───────────────────────►│ recurse into Masquer │   │
//! │  │ (descr.)  │                        └──────────────────────┘   │
//! │  └───────────┘                                                   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mascara::prelude::*;
//!
//! struct LoginWindow {
//!     username: TextField,
//!     password: PasswordField,
//!     submit: Button,
//! }
//!
//! impl Mask for LoginWindow {
//!     const NAME: &'static str = "login-window";
//!
//!     fn wiring() -> Wiring<Self> {
//!         Wiring::new()
//!             .rooted_at(&["login-window"])
//!             .mask::<TextField>("username")
//!             .mask::<PasswordField>("password")
//!             .mask_at::<Button>("submit", &["actions", "submit"])
//!             .assemble(|fields| {
//!                 Ok(Self {
//!                     username: fields.take("username")?,
//!                     password: fields.take("password")?,
//!                     submit: fields.take("submit")?,
//!                 })
//!             })
//!     }
//! }
//!
//! fn main() -> MascaraResult<()> {
//!     let driver = Arc::new(MockDriver::new());
//!     driver.stage(&Locator::from_path(["login-window", "username"])?);
//!     driver.stage(&Locator::from_path(["login-window", "password"])?);
//!     driver.stage(&Locator::from_path(["login-window", "actions", "submit"])?);
//!
//!     let masquer = Masquer::new(driver);
//!     let login: LoginWindow = masquer.resolve()?;
//!     login.username.set_value("admin")?;
//!     login.password.set_value("admin123")?;
//!     login.submit.click()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod components;
mod driver;
mod locator;
mod mask;
mod registry;
mod result;
mod wiring;

pub use components::{Button, Checkbox, Component, PasswordField, TextArea, TextField};
pub use driver::{Driver, Element, ElementState, MockDriver, MockElement};
pub use locator::{Locator, Selector, MASK_ID_ATTRIBUTE};
pub use mask::{Mask, MaskHandle, Masquer};
pub use registry::{ErasedFactory, MaskContext, MaskRegistry};
pub use result::{MascaraError, MascaraResult};
pub use wiring::{WiredFields, Wiring};

/// Convenience re-exports for test authoring
pub mod prelude {
    pub use super::components::*;
    pub use super::driver::*;
    pub use super::locator::*;
    pub use super::mask::*;
    pub use super::registry::*;
    pub use super::result::*;
    pub use super::wiring::*;
}

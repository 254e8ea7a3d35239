//! Placeholder template for Playwright browser tests, and the substitution
//! step that turns it into a runnable test file.

mod error;
mod template;
mod values;

pub use error::ScaffoldError;
pub use template::{BrowserTestTemplate, BUILTIN_TEMPLATE};
pub use values::TemplateValues;

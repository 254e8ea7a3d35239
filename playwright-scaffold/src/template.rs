use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::{ScaffoldError, TemplateValues};

/// Playwright test file for one feature: a user flow, visual regression,
/// accessibility, form validation and load time checks.
pub const BUILTIN_TEMPLATE: &str = include_str!("../templates/browser-test.spec.ts");

// `${NAME}` is a JavaScript template literal, not a placeholder.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\$?)\{([A-Z][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserTestTemplate {
    source: Cow<'static, str>,
}

impl Default for BrowserTestTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BrowserTestTemplate {
    pub fn builtin() -> Self {
        Self {
            source: Cow::Borrowed(BUILTIN_TEMPLATE),
        }
    }

    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: Cow::Owned(source.into()),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScaffoldError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ScaffoldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(source))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distinct placeholder names, in order of first appearance.
    pub fn placeholders(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();

        PLACEHOLDER
            .captures_iter(&self.source)
            .filter(|caps| caps[1].is_empty())
            .map(|caps| caps[2].to_string())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// Substitutes every placeholder. Fails listing all names without a value.
    pub fn render(&self, values: &TemplateValues) -> Result<String, ScaffoldError> {
        let placeholders = self.placeholders();

        let mut missing = placeholders
            .iter()
            .filter(|name| values.get(name).is_none())
            .cloned()
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            missing.sort();
            return Err(ScaffoldError::MissingValues(missing));
        }

        let unused = values
            .names()
            .filter(|name| !placeholders.iter().any(|p| p.as_str() == *name))
            .collect::<Vec<_>>();
        if !unused.is_empty() {
            warn!(?unused, "template values without a matching placeholder");
        }

        debug!(placeholders = placeholders.len(), "rendering browser test");
        Ok(self.render_partial(values))
    }

    /// Substitutes the placeholders that have a value and leaves the rest as-is.
    ///
    /// Substituted text is never scanned again, so values may contain braces.
    pub fn render_partial(&self, values: &TemplateValues) -> String {
        PLACEHOLDER
            .replace_all(&self.source, |caps: &Captures| {
                if !caps[1].is_empty() {
                    return caps[0].to_string();
                }
                values
                    .get(&caps[2])
                    .map(str::to_string)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

//! Environment snapshot used for proxy resolution
//!
//! Resolution reads from an owned snapshot instead of `std::env` directly so
//! that re-resolving is an explicit call over explicit input.

use std::collections::HashMap;
use std::fmt;

pub const ALL_PROXY: &str = "ALL_PROXY";
pub const HTTP_PROXY: &str = "HTTP_PROXY";
pub const HTTPS_PROXY: &str = "HTTPS_PROXY";
pub const NO_PROXY: &str = "NO_PROXY";

/// Owned copy of environment variables.
#[derive(Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Copy the current process environment. Variables whose name or value is
    /// not valid Unicode are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Set one variable, returning the updated snapshot
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Look up a proxy variable by its uppercase name.
    ///
    /// The uppercase key wins over the lowercase one. When both are set to
    /// different values a warning names the variable; values are not logged
    /// because they may carry credentials. Empty values count as unset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let upper = self.non_empty(name);
        let lower = self.non_empty(&name.to_ascii_lowercase());

        match (upper, lower) {
            (Some(upper), Some(lower)) => {
                if upper != lower {
                    tracing::warn!(
                        target: "egress::proxy",
                        variable = name,
                        "uppercase and lowercase forms differ; using the uppercase one"
                    );
                }
                Some(upper)
            }
            (upper, lower) => upper.or(lower),
        }
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

// Values may hold proxy passwords; only the proxy-related keys are shown.
impl fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self
            .vars
            .keys()
            .map(String::as_str)
            .filter(|key| key.to_ascii_uppercase().ends_with("_PROXY"))
            .collect();
        keys.sort_unstable();
        f.debug_struct("EnvSnapshot")
            .field("proxy_keys", &keys)
            .field("total", &self.vars.len())
            .finish()
    }
}

use serde::{Deserialize, Serialize};

/// Options forwarded to every repository query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LookupOptions {
    /// Only offer bundles that are already available locally.
    #[serde(default)]
    pub local_only: bool,
}

/// Resolution settings from the `[resolve]` table of `Bndl.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolveConfig {
    /// Search for providers of optional requirements too.
    #[serde(default)]
    pub optional: bool,

    /// Resolve the requirements of every newly chosen provider.
    #[serde(default = "default_dependents")]
    pub dependents: bool,

    /// Treat unsatisfied mandatory requirements as satisfied.
    #[serde(default)]
    pub ignore_errors: bool,

    #[serde(default, flatten)]
    pub lookup: LookupOptions,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            optional: false,
            dependents: default_dependents(),
            ignore_errors: false,
            lookup: LookupOptions::default(),
        }
    }
}

fn default_dependents() -> bool {
    true
}

impl ResolveConfig {
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_dependents(mut self, dependents: bool) -> Self {
        self.dependents = dependents;
        self
    }

    pub fn with_ignore_errors(mut self, ignore_errors: bool) -> Self {
        self.ignore_errors = ignore_errors;
        self
    }

    pub fn with_local_only(mut self, local_only: bool) -> Self {
        self.lookup.local_only = local_only;
        self
    }
}

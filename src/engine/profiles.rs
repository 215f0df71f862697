//! Named selection policies loaded from TOML.
//!
//! ```toml
//! [profiles.heavy_first]
//! description = "Dump pips before anything else"
//! criteria = ["pip_sum", "double", "hand_frequency"]
//!
//! [production]
//! default = "heavy_first"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::selector::{Criterion, SelectionPolicy};

/// Name of the built-in profile, always available.
pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Deserialize, Clone)]
pub struct PolicyProfile {
    pub description: Option<String>,
    /// Ranking rules, most significant first. Omitted means the built-in order.
    pub criteria: Option<Vec<Criterion>>,
}

impl PolicyProfile {
    pub fn to_policy(&self) -> SelectionPolicy {
        match &self.criteria {
            Some(criteria) => SelectionPolicy::new(criteria.clone()),
            None => SelectionPolicy::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProductionConfig {
    pub default: Option<String>,
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PolicyProfilesFile {
    #[serde(default)]
    pub profiles: HashMap<String, PolicyProfile>,
    #[serde(default)]
    pub production: ProductionConfig,
}

impl PolicyProfilesFile {
    /// Resolve a profile by name. `None` picks the production default, then
    /// the built-in profile.
    pub fn resolve(&self, name: Option<&str>) -> Result<SelectionPolicy, String> {
        let name = name
            .or(self.production.default.as_deref())
            .unwrap_or(DEFAULT_PROFILE);
        match self.profiles.get(name) {
            Some(profile) => Ok(profile.to_policy()),
            None if name == DEFAULT_PROFILE => Ok(SelectionPolicy::default()),
            None => Err(format!("unknown policy profile: {}", name)),
        }
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        if !self.profiles.contains_key(DEFAULT_PROFILE) {
            names.push(DEFAULT_PROFILE.to_string());
        }
        names.sort();
        names
    }
}

/// Load profiles from a TOML file at the given path.
pub fn load_profiles(path: &Path) -> Result<PolicyProfilesFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try to load profiles from well-known paths, returning built-ins if none found.
pub fn load_default_profiles() -> PolicyProfilesFile {
    let candidates = [
        "policy_profiles.toml",
        "../policy_profiles.toml",
        "/etc/domino-engine/policy_profiles.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_profiles(p) {
                Ok(profiles) => {
                    tracing::info!(path = %p.display(), count = profiles.profiles.len(), "loaded policy profiles");
                    return profiles;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load policy profiles");
                }
            }
        }
    }
    tracing::info!("no policy_profiles.toml found, using built-in defaults");
    PolicyProfilesFile::default()
}

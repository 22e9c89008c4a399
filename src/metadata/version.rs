//! Project version descriptor (VERSION.json)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

/// Release codename and version number for the project.
///
/// Loaded from a small JSON file next to the citation file; treated as an
/// opaque input by the assembler. Both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VersionDescriptor {
    pub codename: Option<String>,
    #[serde(deserialize_with = "version_scalar")]
    pub version: Option<String>,
}

/// Accept `"version": "0.9.2"` as well as `"version": 0.9`.
fn version_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

impl VersionDescriptor {
    /// Load the descriptor from `path`, best-effort.
    ///
    /// A missing or malformed file yields an empty descriptor - release
    /// information is optional enrichment, never a failure.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("No version descriptor at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Release label `"<codename> v<version>"`, if both parts are known.
    ///
    /// `fallback_version` supplies the version number when the descriptor
    /// lacks one (the citation file's `version` field, in practice).
    pub fn release_label(&self, fallback_version: Option<&str>) -> Option<String> {
        let codename = non_blank(self.codename.as_deref())?;
        let version = non_blank(self.version.as_deref()).or_else(|| non_blank(fallback_version))?;
        Some(format!("{codename} v{version}"))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

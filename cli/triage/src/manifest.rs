//! `triage.toml` parsing and deployment configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use triage_workflow::RoleNames;

/// File name searched for from the working directory upward.
pub const MANIFEST_FILE: &str = "triage.toml";

/// The top-level configuration for a triage deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageManifest {
    /// SSVC settings.
    #[serde(default)]
    pub ssvc: SsvcConfig,
    /// Role tokens as issued by the identity provider.
    #[serde(default)]
    pub roles: RoleNames,
}

/// SSVC section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsvcConfig {
    /// Decision tree JSON, relative to the directory holding `triage.toml`.
    #[serde(default)]
    pub tree: Option<PathBuf>,
    /// Scheme marker written at the front of new vectors.
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

impl Default for SsvcConfig {
    fn default() -> Self {
        Self {
            tree: None,
            scheme: default_scheme(),
        }
    }
}

fn default_scheme() -> String {
    triage_ssvc::DEFAULT_SCHEME.to_string()
}

impl TriageManifest {
    /// Search upward from `start_dir` for a `triage.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: TriageManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                manifest
                    .roles
                    .validate()
                    .with_context(|| format!("invalid [roles] in {}", candidate.display()))?;
                tracing::debug!(path = %candidate.display(), "loaded configuration");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        let manifest: TriageManifest = toml::from_str(s).context("parsing triage.toml")?;
        manifest.roles.validate()?;
        Ok(manifest)
    }

    /// Resolve the configured decision tree path against the manifest directory.
    pub fn tree_path(&self, manifest_dir: &Path) -> Option<PathBuf> {
        self.ssvc.tree.as_ref().map(|p| manifest_dir.join(p))
    }
}

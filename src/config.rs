// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Configuration loading and analysis policy.

use crate::driver::{DeprecatedPolicy, DuplicatePolicy, Policy};
use crate::exchange::Mode;
use crate::registry::Registry;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GeneralConfig {
    /// Whether input is a request or a response (default: response)
    #[serde(default)]
    pub mode: Mode,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PolicyConfig {
    #[serde(default)]
    pub duplicate: DuplicatePolicy,
    #[serde(default)]
    pub deprecated: DeprecatedPolicy,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NotesConfig {
    /// Note kind names that are dropped before emission
    #[serde(default)]
    pub suppress: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub notes: NotesConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it against `registry`.
    ///
    /// [general]
    /// mode = "request"
    ///
    /// [policy]
    /// duplicate = "override"
    /// deprecated = "ignore"
    ///
    /// [notes]
    /// suppress = ["ENCODING_UNWANTED"]
    pub async fn load_from_path<P: AsRef<std::path::Path>>(
        path: P,
        registry: &Registry,
    ) -> anyhow::Result<Self> {
        let s = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_toml_str(&s, registry)
    }

    pub fn from_toml_str(s: &str, registry: &Registry) -> anyhow::Result<Self> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate(registry)?;
        Ok(cfg)
    }

    /// Reject suppression entries that name no known note kind.
    pub fn validate(&self, registry: &Registry) -> anyhow::Result<()> {
        let known = registry.note_kinds();
        for name in &self.notes.suppress {
            if !known.iter().any(|k| k.name == name.as_str()) {
                anyhow::bail!("Unknown note kind '{}' in [notes] suppress", name);
            }
        }
        Ok(())
    }

    /// Driver policy described by this configuration.
    pub fn policy(&self) -> Policy {
        Policy {
            duplicate: self.policy.duplicate,
            deprecated: self.policy.deprecated,
            suppress: self.notes.suppress.iter().cloned().collect(),
        }
    }
}

//! Builder-style options for a scan and serde-friendly filter descriptions.

use serde::{Deserialize, Serialize};

use crate::constants::{MIN_WINDOW_SIZE, WINDOW_SIZE};
use crate::criteria::{AllCriteria, NamespaceCriteria};
use crate::error::{OplogError, Result};

fn default_true() -> bool {
    true
}

fn default_window_size() -> usize {
    WINDOW_SIZE
}

/// Tunable options for one pass over a log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Bytes mapped per window. The last window of a file may be shorter.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Keep a dropped trailing fragment in the scan report.
    /// When disabled the truncation is still logged.
    #[serde(default = "default_true")]
    pub report_truncated: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            report_truncated: true,
        }
    }
}

impl ScanOptions {
    /// Start a fluent builder for `ScanOptions`.
    #[must_use]
    pub fn builder() -> ScanOptionsBuilder {
        ScanOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size < MIN_WINDOW_SIZE {
            return Err(OplogError::InvalidConfig {
                reason: format!(
                    "window_size {} is below the minimum of {MIN_WINDOW_SIZE} bytes",
                    self.window_size
                )
                .into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanOptionsBuilder {
    inner: ScanOptions,
}

impl ScanOptionsBuilder {
    #[must_use]
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.inner.window_size = window_size;
        self
    }

    #[must_use]
    pub fn report_truncated(mut self, enabled: bool) -> Self {
        self.inner.report_truncated = enabled;
        self
    }

    #[must_use]
    pub fn build(self) -> ScanOptions {
        self.inner
    }
}

/// One namespace criterion as it appears in a filter configuration,
/// e.g. `{"namespace": "app.orders.insert", "exclude": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceFilterSpec {
    pub namespace: String,
    #[serde(default)]
    pub exclude: bool,
}

impl NamespaceFilterSpec {
    #[must_use]
    pub fn new<S: Into<String>>(namespace: S, exclude: bool) -> Self {
        Self {
            namespace: namespace.into(),
            exclude,
        }
    }

    pub fn build(&self) -> Result<NamespaceCriteria> {
        if self.namespace.trim().is_empty() {
            return Err(OplogError::InvalidConfig {
                reason: "namespace filter must not be empty".into(),
            });
        }
        Ok(NamespaceCriteria::new(self.namespace.trim(), self.exclude))
    }
}

/// Scan options plus the namespace filters applied to every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub scan: ScanOptions,
    #[serde(default)]
    pub filters: Vec<NamespaceFilterSpec>,
}

impl FilterConfig {
    /// Parse and validate a JSON filter configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.scan.validate()?;
        Ok(config)
    }

    /// Combine every configured filter into one criterion that requires all of them.
    pub fn build_criteria(&self) -> Result<AllCriteria> {
        let mut all = AllCriteria::new();
        for spec in &self.filters {
            all.push(spec.build()?);
        }
        Ok(all)
    }
}

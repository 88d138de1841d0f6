use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_KAPPA;
use crate::error::{Result, StackError};

/// Options for one stacking invocation.
///
/// Serialized field names follow the dashboard's options record
/// (`mode`, `alignment`, `sigmaClip { enabled, kappa }`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StackOptions {
    pub mode: StackMode,
    pub alignment: AlignmentMode,
    pub sigma_clip: Option<SigmaClipConfig>,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            mode: StackMode::Average,
            alignment: AlignmentMode::Centroid,
            sigma_clip: Some(SigmaClipConfig::default()),
        }
    }
}

impl StackOptions {
    pub fn new(mode: StackMode, alignment: AlignmentMode) -> Self {
        Self {
            mode,
            alignment,
            sigma_clip: None,
        }
    }

    pub fn with_sigma_clip(mut self, kappa: f64) -> Self {
        self.sigma_clip = Some(SigmaClipConfig {
            enabled: true,
            kappa,
        });
        self
    }

    pub fn without_sigma_clip(mut self) -> Self {
        self.sigma_clip = None;
        self
    }

    /// Kappa to clip with, or `None` when clipping is off.
    pub fn active_kappa(&self) -> Option<f64> {
        self.sigma_clip
            .as_ref()
            .filter(|sc| sc.enabled)
            .map(|sc| sc.kappa)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(kappa) = self.active_kappa() {
            if !(kappa.is_finite() && kappa > 0.0) {
                return Err(StackError::InvalidKappa(kappa));
            }
        }
        Ok(())
    }
}

/// Pixel-wise combination statistic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StackMode {
    #[default]
    Average,
    Median,
}

impl std::fmt::Display for StackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Average => write!(f, "Average"),
            Self::Median => write!(f, "Median"),
        }
    }
}

/// How per-frame offsets are estimated before combination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentMode {
    #[default]
    Centroid,
    PhaseCorrelation,
    None,
}

impl std::fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Centroid => write!(f, "Centroid"),
            Self::PhaseCorrelation => write!(f, "Phase Correlation"),
            Self::None => write!(f, "None"),
        }
    }
}

/// Outlier rejection applied per output pixel across the frame stack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigmaClipConfig {
    pub enabled: bool,
    /// Rejection threshold in standard deviations (default: 2.2).
    pub kappa: f64,
}

impl Default for SigmaClipConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kappa: DEFAULT_KAPPA,
        }
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extract::{Extractor, Marker};

/// Grader configuration. Every section is optional; an empty marker list
/// keeps the built-in markers for that task.
///
/// ```yaml
/// typos:
///   markers:
///     - type: wrapped_tag
///       open: "<answer>"
///       close: "</answer>"
/// unscrambling:
///   ignored_sentences: ["</PLOT_SUMMARY>"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraderConfig {
    pub typos: MarkerConfig,
    pub connections: MarkerConfig,
    pub unscrambling: UnscramblingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub markers: Vec<Marker>,
}

impl MarkerConfig {
    pub fn extractor_or(&self, default: fn() -> Extractor) -> Extractor {
        extractor_from(&self.markers, default)
    }
}

fn extractor_from(markers: &[Marker], default: fn() -> Extractor) -> Extractor {
    if markers.is_empty() {
        default()
    } else {
        Extractor::new(markers.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnscramblingConfig {
    pub markers: Vec<Marker>,
    /// Sentences dropped from both label and answer before matching.
    pub ignored_sentences: Vec<String>,
}

impl Default for UnscramblingConfig {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            ignored_sentences: default_ignored_sentences(),
        }
    }
}

impl UnscramblingConfig {
    pub fn extractor(&self) -> Extractor {
        extractor_from(&self.markers, Extractor::unscrambling)
    }
}

pub fn default_ignored_sentences() -> Vec<String> {
    vec![
        "</PLOT_SUMMARY>".to_string(),
        "**End of Plot Summary**".to_string(),
    ]
}

impl GraderConfig {
    /// Parses YAML (and therefore JSON) configuration text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(?path, "loaded grader config");
        Ok(config)
    }
}

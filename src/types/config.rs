use crate::error::EvaluateError;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluateConfig {
    pub test: Option<TestConfig>,
    pub risk: Option<RiskConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioMode {
    /// Test lines added over implementation lines added.
    #[default]
    Lines,
    /// Test file count over implementation file count.
    Files,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestConfig {
    pub ratio_mode: Option<RatioMode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    #[serde(default)]
    pub sensitive_files: Vec<String>,
    #[serde(default)]
    pub sensitive_extensions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormatConfig {
    Text,
    Json,
    Sarif,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormatConfig>,
}

impl EvaluateConfig {
    pub fn ratio_mode(&self) -> RatioMode {
        self.test
            .as_ref()
            .and_then(|test| test.ratio_mode)
            .unwrap_or_default()
    }

    pub fn extra_sensitive_files(&self) -> &[String] {
        self.risk
            .as_ref()
            .map(|risk| risk.sensitive_files.as_slice())
            .unwrap_or_default()
    }

    pub fn extra_sensitive_extensions(&self) -> &[String] {
        self.risk
            .as_ref()
            .map(|risk| risk.sensitive_extensions.as_slice())
            .unwrap_or_default()
    }

    pub fn output_format(&self) -> Option<OutputFormatConfig> {
        self.output.as_ref().and_then(|output| output.format)
    }

    pub fn validate(&self) -> Result<(), EvaluateError> {
        let Some(risk) = &self.risk else {
            return Ok(());
        };

        for (key, entries) in [
            ("sensitive_files", &risk.sensitive_files),
            ("sensitive_extensions", &risk.sensitive_extensions),
        ] {
            let mut seen = HashSet::new();
            for entry in entries {
                let normalized = entry.trim();
                if normalized.is_empty() {
                    return Err(EvaluateError::ConfigParse(format!(
                        "risk.{key} entries must be non-empty"
                    )));
                }
                if !seen.insert(normalized) {
                    return Err(EvaluateError::ConfigParse(format!(
                        "risk.{key} contains duplicate entry: {normalized}"
                    )));
                }
            }
        }

        if let Some(bad) = risk
            .sensitive_extensions
            .iter()
            .find(|extension| !extension.trim().starts_with('.'))
        {
            return Err(EvaluateError::ConfigParse(format!(
                "risk.sensitive_extensions entries must start with '.': {bad}"
            )));
        }

        Ok(())
    }
}

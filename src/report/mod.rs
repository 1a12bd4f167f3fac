pub mod json;
pub mod sarif;
pub mod text;

use crate::error::EvaluateError;
use crate::types::report::EvaluationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Sarif,
}

pub fn render(result: &EvaluationResult, format: OutputFormat) -> Result<String, EvaluateError> {
    match format {
        OutputFormat::Text => Ok(text::to_text(result)),
        OutputFormat::Json => json::to_json(result).map_err(EvaluateError::Json),
        OutputFormat::Sarif => sarif::to_sarif(result).map_err(EvaluateError::Json),
    }
}

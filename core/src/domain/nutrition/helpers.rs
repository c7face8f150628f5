use crate::domain::nutrition::{
    errors::ExtractionCause,
    sanitizer::sanitize,
    schema::{ValidatedLog, validate},
};

/// Sanitizes, parses and validates a raw extraction response.
pub fn parse_extraction_response(raw: &str) -> Result<ValidatedLog, ExtractionCause> {
    let cleaned = sanitize(raw);

    let parsed: serde_json::Value = serde_json::from_str(&cleaned).map_err(|e| {
        tracing::warn!(error = %e, "extraction response is not valid JSON after sanitizing");
        ExtractionCause::MalformedJson(e.to_string())
    })?;

    validate(&parsed).map_err(|e| {
        tracing::warn!(error = %e, "extraction response failed validation");
        ExtractionCause::from(e)
    })
}

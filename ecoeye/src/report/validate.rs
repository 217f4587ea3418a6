//! Validation of untrusted report payloads.
//!
//! The generation backend relays large-language-model output, which is not
//! guaranteed to be well-formed. Rather than trusting individual field
//! presence ad hoc, every payload passes through a single boundary check
//! here: it must be (or parse to) a JSON object carrying a `tips` object,
//! and must deserialize into [`EcoReport`].

use serde_json::Value;
use thiserror::Error;

use super::EcoReport;

/// Reasons a report payload is rejected.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// The payload was a raw string that is not valid JSON.
    #[error("report text is not valid JSON: {0}")]
    UnparseableText(String),

    /// The payload parsed, but is not a JSON object.
    #[error("report payload is not a JSON object")]
    NotAnObject,

    /// The payload is an object without a `tips` sub-object.
    #[error("report payload has no tips object")]
    MissingTips,

    /// The payload does not match the report shape.
    #[error("report payload has invalid shape: {0}")]
    InvalidShape(String),
}

/// Parses an untrusted report payload into a validated [`EcoReport`].
///
/// String payloads are first parsed as JSON (the generation model returns
/// the report as text). The parsed value must be an object with a `tips`
/// object; anything else is rejected and the caller falls back to the
/// bundled report.
pub fn parse_report_value(value: &Value) -> Result<EcoReport, ValidationError> {
    let parsed: Value = match value {
        Value::String(raw) => serde_json::from_str(raw)
            .map_err(|e| ValidationError::UnparseableText(e.to_string()))?,
        other => other.clone(),
    };

    let obj = parsed.as_object().ok_or(ValidationError::NotAnObject)?;

    if !obj.get("tips").map(Value::is_object).unwrap_or(false) {
        return Err(ValidationError::MissingTips);
    }

    serde_json::from_value(parsed).map_err(|e| ValidationError::InvalidShape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_report_json() -> Value {
        json!({
            "overallGrade": "A",
            "fuelEfficiency": "18 km/l",
            "emissions": "Euro 6",
            "powerType": "Gasoline",
            "co2": "120 g/km",
            "recyclability": "80%",
            "tips": {
                "speed": "90 km/h",
                "tirePressure": "32 PSI",
                "idling": "2 minutes",
                "passengers": "2-3",
                "funFact": "Smooth acceleration saves fuel."
            }
        })
    }

    #[test]
    fn test_accepts_object_payload() {
        let report = parse_report_value(&valid_report_json()).unwrap();
        assert_eq!(report.overall_grade, "A");
        assert_eq!(report.tips.speed, "90 km/h");
    }

    #[test]
    fn test_accepts_stringified_payload() {
        let text = valid_report_json().to_string();
        let report = parse_report_value(&Value::String(text)).unwrap();
        assert_eq!(report.co2, "120 g/km");
    }

    #[test]
    fn test_rejects_unparseable_text() {
        let result = parse_report_value(&Value::String("not json{".to_string()));
        assert!(matches!(result, Err(ValidationError::UnparseableText(_))));
    }

    #[test]
    fn test_rejects_non_object() {
        let result = parse_report_value(&json!([1, 2, 3]));
        assert!(matches!(result, Err(ValidationError::NotAnObject)));

        let result = parse_report_value(&json!(42));
        assert!(matches!(result, Err(ValidationError::NotAnObject)));
    }

    #[test]
    fn test_rejects_missing_tips() {
        let result = parse_report_value(&json!({"overallGrade": "A"}));
        assert!(matches!(result, Err(ValidationError::MissingTips)));
    }

    #[test]
    fn test_rejects_tips_of_wrong_type() {
        let result = parse_report_value(&json!({"tips": "drive slowly"}));
        assert!(matches!(result, Err(ValidationError::MissingTips)));
    }

    #[test]
    fn test_tolerates_missing_optional_fields() {
        // Only the tips object is structurally required
        let report = parse_report_value(&json!({"tips": {}})).unwrap();
        assert_eq!(report.overall_grade, "");
        assert_eq!(report.tips.fun_fact, "");
    }
}

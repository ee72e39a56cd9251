use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::domain::FailureKind;

pub const MAX_SCORE: u8 = 100;

/// Lowest score that counts as meeting the standard.
pub const COMPLIANCE_THRESHOLD: u8 = 90;

pub const VERDICT_COMPLIANT: &str = "Соответствует";
pub const VERDICT_NON_COMPLIANT: &str = "Не соответствует";

/// Summary shown when a simulated audit could not be produced.
pub const FAILED_AUDIT_SUMMARY: &str =
    "Произошла ошибка при соединении с сервером аналитики.";

/// Outcome of one simulated accessibility audit.
///
/// The score is always within `0..=100`; constructors clamp anything else.
/// Serialized with the model's five keys plus the derived `compliant` and
/// `verdict`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    score: u8,
    errors: Vec<String>,
    warnings: Vec<String>,
    passes: Vec<String>,
    summary: String,
}

impl AnalysisResult {
    pub fn new(
        score: u8,
        errors: Vec<String>,
        warnings: Vec<String>,
        passes: Vec<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            score: score.min(MAX_SCORE),
            errors,
            warnings,
            passes,
            summary: summary.into(),
        }
    }

    /// Degraded result for an audit that failed: score 0, one error naming
    /// the failure class, nothing else.
    pub fn failed(kind: FailureKind) -> Self {
        Self::new(
            0,
            vec![kind.describe().to_string()],
            Vec::new(),
            Vec::new(),
            FAILED_AUDIT_SUMMARY,
        )
    }

    /// Round a model-reported score and clamp it into `0..=100`.
    /// NaN maps to 0.
    pub fn clamp_score(raw: f64) -> u8 {
        if raw.is_nan() {
            return 0;
        }
        raw.round().clamp(0.0, MAX_SCORE as f64) as u8
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn is_compliant(&self) -> bool {
        self.score >= COMPLIANCE_THRESHOLD
    }

    pub fn verdict(&self) -> &'static str {
        if self.is_compliant() {
            VERDICT_COMPLIANT
        } else {
            VERDICT_NON_COMPLIANT
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn passes(&self) -> &[String] {
        &self.passes
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AnalysisResult", 7)?;
        state.serialize_field("score", &self.score)?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.serialize_field("passes", &self.passes)?;
        state.serialize_field("summary", &self.summary)?;
        state.serialize_field("compliant", &self.is_compliant())?;
        state.serialize_field("verdict", self.verdict())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_score_rounds_and_bounds() {
        assert_eq!(AnalysisResult::clamp_score(72.4), 72);
        assert_eq!(AnalysisResult::clamp_score(72.5), 73);
        assert_eq!(AnalysisResult::clamp_score(-5.0), 0);
        assert_eq!(AnalysisResult::clamp_score(250.0), 100);
        assert_eq!(AnalysisResult::clamp_score(f64::NAN), 0);
    }

    #[test]
    fn new_clamps_score() {
        let result = AnalysisResult::new(180, vec![], vec![], vec![], "");
        assert_eq!(result.score(), 100);
    }

    #[test]
    fn failed_result_is_well_formed() {
        let result = AnalysisResult::failed(FailureKind::Decode);
        assert_eq!(result.score(), 0);
        assert_eq!(result.errors().len(), 1);
        assert!(result.warnings().is_empty());
        assert!(result.passes().is_empty());
        assert_eq!(result.summary(), FAILED_AUDIT_SUMMARY);
    }

    #[test]
    fn serializes_with_wire_keys() {
        let result = AnalysisResult::new(
            64,
            vec!["Нет alt-текста".to_string()],
            vec![],
            vec!["Язык страницы указан".to_string()],
            "Средний уровень",
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], 64);
        assert_eq!(json["errors"][0], "Нет alt-текста");
        assert_eq!(json["passes"][0], "Язык страницы указан");
        assert_eq!(json["summary"], "Средний уровень");
        assert_eq!(json["compliant"], false);
        assert_eq!(json["verdict"], VERDICT_NON_COMPLIANT);
    }

    #[test]
    fn compliance_starts_at_ninety() {
        let below = AnalysisResult::new(89, vec![], vec![], vec![], "");
        let at = AnalysisResult::new(90, vec![], vec![], vec![], "");
        assert!(!below.is_compliant());
        assert_eq!(below.verdict(), "Не соответствует");
        assert!(at.is_compliant());
        assert_eq!(at.verdict(), "Соответствует");
    }

    #[test]
    fn failed_result_is_not_compliant() {
        let result = AnalysisResult::failed(FailureKind::Transport);
        assert!(!result.is_compliant());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["compliant"], false);
    }
}

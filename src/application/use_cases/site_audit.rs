use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ModelGateway;
use crate::domain::{
    AnalysisResult, Content, DomainError, FailureKind, GenerationRequest, OutputSchema,
};

/// Shape the model is asked to return. Every key is required.
#[derive(Deserialize)]
struct RawAnalysis {
    score: f64,
    errors: Vec<String>,
    warnings: Vec<String>,
    passes: Vec<String>,
    summary: String,
}

/// Simulated accessibility audit of a URL.
///
/// The model never fetches the page: it reasons from the URL text and its
/// own prior knowledge, and the prompt says so. Results are heuristic.
pub struct SiteAuditUseCase {
    gateway: Arc<dyn ModelGateway>,
}

impl SiteAuditUseCase {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    pub fn prompt(url: &str) -> String {
        format!(
            "Выполните аудит веб-сайта \"{url}\" на соответствие стандартам WCAG 2.2 уровня AA и СТ РК 2191‑2023.

Так как прямой доступ к коду ограничен, выполните эвристический анализ, основываясь на вашем знании о типичных проблемах доступности для сайтов такого типа (государственные порталы, корпоративные сайты и т.д.) или используя публично доступную информацию об этом ресурсе.

Сгенерируйте реалистичный отчет, включающий:
1. Общий балл доступности (от 0 до 100).
2. Список конкретных ошибок (Errors), критичных для уровня AA.
3. Список предупреждений (Warnings).
4. Список успешных критериев (Passes), которые сайт, вероятно, соблюдает.
5. Краткое резюме (summary) на русском языке.

Будьте строги, но справедливы. Учитывайте контрастность, навигацию с клавиатуры, alt-тексты, ARIA-атрибуты и семантику."
        )
    }

    pub fn schema() -> OutputSchema {
        let strings = || OutputSchema::array_of(OutputSchema::string());
        OutputSchema::object()
            .with_property(
                "score",
                OutputSchema::number().with_description("Общий балл доступности от 0 до 100"),
                true,
            )
            .with_property(
                "errors",
                strings().with_description("Список нарушений стандартов WCAG 2.2 AA"),
                true,
            )
            .with_property(
                "warnings",
                strings().with_description("Рекомендации по улучшению"),
                true,
            )
            .with_property(
                "passes",
                strings().with_description("Успешно пройденные критерии"),
                true,
            )
            .with_property(
                "summary",
                OutputSchema::string().with_description("Краткое текстовое резюме аудита"),
                true,
            )
    }

    pub fn build_request(&self, url: &str) -> GenerationRequest {
        GenerationRequest::new(self.gateway.model())
            .with_content(Content::user_text(Self::prompt(url)))
            .with_output_schema(Self::schema())
    }

    /// Parse model text into a result.
    ///
    /// Anything outside the outermost `{…}` is ignored so a stray code
    /// fence or sentence around the JSON does not fail the audit.
    pub fn decode(text: &str) -> Result<AnalysisResult, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::decode("model returned no text"));
        }

        let json = match (text.find('{'), text.rfind('}')) {
            (Some(s), Some(e)) if s < e => &text[s..=e],
            _ => return Err(DomainError::decode("model response contains no JSON object")),
        };

        let raw: RawAnalysis = serde_json::from_str(json).map_err(|e| {
            DomainError::decode(format!("model response does not match schema: {e}"))
        })?;

        Ok(AnalysisResult::new(
            AnalysisResult::clamp_score(raw.score),
            raw.errors,
            raw.warnings,
            raw.passes,
            raw.summary,
        ))
    }

    pub async fn analyze_site(&self, url: &str) -> AnalysisResult {
        let outcome = match self.gateway.complete(self.build_request(url)).await {
            Ok(text) => {
                debug!("SiteAudit raw response: {text}");
                Self::decode(&text)
            }
            Err(e) => Err(e),
        };

        outcome.unwrap_or_else(|e| {
            warn!("SiteAudit: audit of {url} failed: {e}");
            AnalysisResult::failed(FailureKind::from(&e))
        })
    }
}

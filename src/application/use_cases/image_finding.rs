use std::sync::Arc;

use tracing::warn;

use crate::application::ModelGateway;
use crate::domain::{Content, GenerationRequest, ImagePayload, Part, Role};

pub const IMAGE_ANALYSIS_PROMPT: &str = "\
Проанализируй это изображение (скриншот веб-сайта или интерфейса) на предмет соответствия базовым принципам доступности WCAG 2.2 и СТ РК 2191‑2023.

Укажи:
1. Проблемы с контрастностью (если есть).
2. Читаемость текста.
3. Наличие визуального шума или перегрузки.
4. Предполагаемые проблемы для скринридеров (на основе визуальной структуры).

Ответ дай в формате краткого, структурированного отчета на русском языке.";

pub const IMAGE_FALLBACK: &str =
    "Ошибка анализа изображения. Пожалуйста, убедитесь, что вы загрузили корректный файл.";

/// Heuristic accessibility commentary on a single screenshot.
pub struct ImageFindingUseCase {
    gateway: Arc<dyn ModelGateway>,
}

impl ImageFindingUseCase {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    pub fn build_request(&self, image: &ImagePayload) -> GenerationRequest {
        GenerationRequest::new(self.gateway.model()).with_content(Content::new(
            Role::User,
            vec![
                Part::text(IMAGE_ANALYSIS_PROMPT),
                Part::InlineData {
                    mime_type: image.mime_type().to_string(),
                    data: image.data().to_vec(),
                },
            ],
        ))
    }

    pub async fn analyze_image(&self, image: &ImagePayload) -> String {
        match self.gateway.complete(self.build_request(image)).await {
            Ok(text) => text,
            Err(e) => {
                warn!("ImageFinding: model call failed: {e}");
                IMAGE_FALLBACK.to_string()
            }
        }
    }

    /// Accepts bare base64 or a `data:` URL.
    pub async fn analyze_base64(&self, raw: &str) -> String {
        match ImagePayload::from_base64(raw) {
            Ok(image) => self.analyze_image(&image).await,
            Err(e) => {
                warn!("ImageFinding: rejecting payload: {e}");
                IMAGE_FALLBACK.to_string()
            }
        }
    }
}

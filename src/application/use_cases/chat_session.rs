use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ModelGateway;
use crate::domain::{ChatMessage, Content, DomainError, GenerationRequest};

/// Persona and domain facts for the consultant chat.
pub const CONSULTANT_INSTRUCTION: &str = "\
Вы — эксперт-консультант по цифровой доступности и стандартам WCAG 2.2 и СТ РК 2191‑2023.
Ваша целевая аудитория — представители государственных органов Казахстана.

Ваши задачи:
1. Отвечать на вопросы о внедрении стандартов доступности.
2. Объяснять технические требования (POUR: Воспринимаемость, Управляемость, Понятность, Надёжность).
3. Рассказывать о сроках (полное внедрение до конца 2026 года) и ответственности.
4. Быть вежливым, профессиональным и убедительным.

Используйте информацию:
- СТ РК 2191‑2023 гармонизирован с WCAG 2.2.
- Более 1 млрд людей в мире живут с инвалидностью.
- Казахстан ратифицировал Конвенцию ООН.
- Уровень соответствия для госсайтов обычно AA.";

/// Reply when the service could not be reached.
pub const CHAT_TRANSPORT_FALLBACK: &str =
    "Произошла ошибка при обращении к сервису консультаций.";

/// Reply when the service answered with nothing.
pub const CHAT_EMPTY_FALLBACK: &str =
    "Извините, я не смог сгенерировать ответ. Попробуйте еще раз.";

/// Turns a running conversation plus a new user message into one reply.
///
/// Gateway failures never escape: they become one of the fallback replies.
pub struct ChatSessionUseCase {
    gateway: Arc<dyn ModelGateway>,
}

impl ChatSessionUseCase {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    pub fn build_request(&self, history: &[ChatMessage], message: &str) -> GenerationRequest {
        GenerationRequest::new(self.gateway.model())
            .with_system_instruction(CONSULTANT_INSTRUCTION)
            .with_contents(history.iter().map(Content::from))
            .with_content(Content::user_text(message))
    }

    pub async fn send_message(&self, history: &[ChatMessage], message: &str) -> String {
        if message.trim().is_empty() {
            debug!("ChatSession: blank message, skipping model call");
            return CHAT_EMPTY_FALLBACK.to_string();
        }

        let request = self.build_request(history, message);
        debug!(
            "ChatSession: sending {} history turns to {}",
            history.len(),
            request.model
        );

        match self.gateway.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("ChatSession: model call failed: {e}");
                Self::fallback_for(&e).to_string()
            }
        }
    }

    fn fallback_for(err: &DomainError) -> &'static str {
        if err.is_empty_response() {
            CHAT_EMPTY_FALLBACK
        } else {
            CHAT_TRANSPORT_FALLBACK
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::ScriptedGateway;
    use crate::domain::{Part, Role};

    #[tokio::test]
    async fn history_is_sent_in_order_before_new_message() {
        let gateway = Arc::new(ScriptedGateway::new().with_reply("Срок — конец 2026 года."));
        let use_case = ChatSessionUseCase::new(gateway.clone());

        let history = vec![
            ChatMessage::user("Что такое СТ РК 2191?"),
            ChatMessage::model("Национальный стандарт доступности."),
        ];
        let reply = use_case.send_message(&history, "Какие сроки?").await;
        assert_eq!(reply, "Срок — конец 2026 года.");

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.system_instruction.as_deref(), Some(CONSULTANT_INSTRUCTION));
        assert!(request.output_schema.is_none());

        let roles: Vec<Role> = request.contents.iter().map(|c| c.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Model, Role::User]);
        assert_eq!(request.contents[2].parts, vec![Part::text("Какие сроки?")]);
    }

    #[tokio::test]
    async fn empty_response_uses_retry_fallback() {
        let gateway = Arc::new(ScriptedGateway::new().with_empty_response());
        let use_case = ChatSessionUseCase::new(gateway);

        let reply = use_case.send_message(&[], "Привет").await;
        assert_eq!(reply, CHAT_EMPTY_FALLBACK);
    }

    #[tokio::test]
    async fn blank_message_does_not_call_gateway() {
        let gateway = Arc::new(ScriptedGateway::new());
        let use_case = ChatSessionUseCase::new(gateway.clone());

        let reply = use_case.send_message(&[], "   ").await;
        assert_eq!(reply, CHAT_EMPTY_FALLBACK);
        assert!(gateway.requests().is_empty());
    }
}

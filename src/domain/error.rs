use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Network, authentication or status failure reaching the model service.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered but produced no usable text.
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Text came back but does not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn empty_response(msg: impl Into<String>) -> Self {
        Self::EmptyResponse(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_empty_response(&self) -> bool {
        matches!(self, Self::EmptyResponse(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// The failure class an adapter absorbed, as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    EmptyResponse,
    Decode,
}

impl FailureKind {
    /// Short Russian description shown as the single error entry of a
    /// degraded audit result.
    pub fn describe(&self) -> &'static str {
        match self {
            FailureKind::Transport => {
                "Не удалось выполнить анализ: сервис анализа недоступен. Проверьте правильность URL и повторите попытку."
            }
            FailureKind::EmptyResponse => {
                "Не удалось выполнить анализ: сервис анализа вернул пустой ответ."
            }
            FailureKind::Decode => {
                "Не удалось выполнить анализ: ответ сервиса анализа имеет неверный формат."
            }
        }
    }
}

impl From<&DomainError> for FailureKind {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::EmptyResponse(_) => FailureKind::EmptyResponse,
            DomainError::Decode(_) => FailureKind::Decode,
            _ => FailureKind::Transport,
        }
    }
}

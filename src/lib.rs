pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::{Commands, OutputFormat};

pub use application::{ChatSessionUseCase, ImageFindingUseCase, ModelGateway, SiteAuditUseCase};

pub use connector::{GatewayConfig, GeminiGateway, ScriptedGateway};

pub use domain::{
    AnalysisResult, ChatMessage, Content, DomainError, FailureKind, GenerationRequest,
    ImagePayload, OutputSchema, Part, Role, DEFAULT_IMAGE_MIME,
};

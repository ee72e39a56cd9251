use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ModelGateway;
use crate::connector::adapter::{GatewayConfig, GeminiGateway, ScriptedGateway};
use crate::{ChatSessionUseCase, ImageFindingUseCase, SiteAuditUseCase};

pub struct ContainerConfig {
    pub gateway: GatewayConfig,
    /// Answer from the scripted gateway instead of calling the model service.
    pub offline: bool,
}

impl ContainerConfig {
    pub fn from_env() -> Self {
        Self {
            gateway: GatewayConfig::from_env(),
            offline: false,
        }
    }
}

/// Wires the gateway into the three adapters.
pub struct Container {
    gateway: Arc<dyn ModelGateway>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let gateway: Arc<dyn ModelGateway> = if config.offline {
            debug!("Using scripted offline gateway");
            Arc::new(ScriptedGateway::new())
        } else {
            if !config.gateway.has_credential() {
                warn!("No Gemini API key configured; model calls will fail until GEMINI_API_KEY is set");
            }
            debug!(
                "Using Gemini gateway at {} with model {}",
                config.gateway.base_url, config.gateway.model
            );
            Arc::new(GeminiGateway::new(config.gateway))
        };
        Self { gateway }
    }

    pub fn with_gateway(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    pub fn chat_use_case(&self) -> ChatSessionUseCase {
        ChatSessionUseCase::new(self.gateway.clone())
    }

    pub fn image_use_case(&self) -> ImageFindingUseCase {
        ImageFindingUseCase::new(self.gateway.clone())
    }

    pub fn site_audit_use_case(&self) -> SiteAuditUseCase {
        SiteAuditUseCase::new(self.gateway.clone())
    }

    pub fn model(&self) -> &str {
        self.gateway.model()
    }
}

use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{ChatController, ImageController, SiteAuditController};

pub struct Router<'a> {
    chat_controller: ChatController<'a>,
    image_controller: ImageController<'a>,
    site_audit_controller: SiteAuditController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            chat_controller: ChatController::new(container),
            image_controller: ImageController::new(container),
            site_audit_controller: SiteAuditController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Chat {
                message,
                history_file,
            } => self.chat_controller.chat(message, history_file).await,
            Commands::AnalyzeSite { url, format } => {
                self.site_audit_controller.analyze(url, format).await
            }
            Commands::AnalyzeImage { path } => self.image_controller.analyze(path).await,
            Commands::Serve { .. } => unreachable!("Serve command is handled separately in main"),
        }
    }
}

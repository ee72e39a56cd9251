pub mod chat_controller;
pub mod image_controller;
pub mod site_audit_controller;

pub use chat_controller::{to_history, ChatController, HistoryEntry};
pub use image_controller::ImageController;
pub use site_audit_controller::SiteAuditController;

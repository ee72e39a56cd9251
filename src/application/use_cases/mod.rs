mod chat_session;
mod image_finding;
mod site_audit;

pub use chat_session::*;
pub use image_finding::*;
pub use site_audit::*;

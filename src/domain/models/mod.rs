mod analysis_result;
mod chat_message;
mod generation_request;
mod image_payload;
mod output_schema;

pub use analysis_result::*;
pub use chat_message::*;
pub use generation_request::*;
pub use image_payload::*;
pub use output_schema::*;

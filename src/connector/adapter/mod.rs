mod gemini_gateway;
mod scripted_gateway;

pub use gemini_gateway::*;
pub use scripted_gateway::*;

pub use body::*;
pub use webhook_message::*;

mod body;
mod webhook_message;

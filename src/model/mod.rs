pub use component::*;
pub use embed::*;
pub use errors::*;
pub use interaction::*;
pub use mention::*;
pub use message::*;

mod component;
mod embed;
mod errors;
mod interaction;
mod mention;
mod message;

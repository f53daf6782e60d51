use once_cell::sync::Lazy;

pub mod configuration;
pub mod constants;
pub mod discord;
pub mod logging;
pub mod requester;

pub static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

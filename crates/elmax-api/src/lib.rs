// elmax-api: Async Rust client for the Elmax Cloud alarm control panel API

pub mod auth;
pub mod client;
pub mod command;
pub mod constants;
pub mod endpoints;
pub mod error;
pub mod registry;
pub mod transport;

mod discovery;
mod models;
mod panels;
mod status;

pub use auth::Credentials;
pub use client::Client;
pub use command::{Command, UnknownCommand};
pub use endpoints::{Endpoint, Endpoints};
pub use error::Error;
pub use registry::{ControlPanel, ControlPanelRegistry};
pub use transport::ClientConfig;

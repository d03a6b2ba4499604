pub mod api;
pub mod auth;
pub mod browser;
pub mod config;
pub mod error;
pub mod flow;
pub mod media;
pub mod models;
pub mod room;
pub mod sdk;
pub mod state;
pub mod storage;
pub mod token;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Config, ServerConfig};
pub use error::{AppError, Result};
pub use flow::{Collaborators, Flow, FlowState, Modals};
pub use state::AppState;

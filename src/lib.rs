// src/lib.rs

pub mod api;
pub mod app;
pub mod chat;
pub mod chat_message;
pub mod clipboard;
pub mod config;
pub mod constants;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod models;
pub mod relay;
pub mod speech;
pub mod ui;
pub mod widget;

pub use config::Config;
pub use errors::{MurmurError, MurmurResult};
pub use widget::{ChatWidget, WidgetEvent};

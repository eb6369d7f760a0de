//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `engine`: the admin conversation engine (creation and edit wizards)
//! - `message_handler`: maps incoming text and photo messages to engine events
//! - `callback_handler`: maps inline keyboard callback queries to engine events
//! - `outbound`: the chat output port and its Telegram implementation
//! - `ui_builder`: creates keyboards and formats messages

pub mod callback_handler;
pub mod engine;
pub mod message_handler;
pub mod outbound;
pub mod ui_builder;

// Re-export the handler entry points for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

pub use engine::{AdminEngine, Event};
pub use outbound::{ChatOutbox, TelegramOutbox};

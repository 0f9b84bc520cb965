pub mod command;
pub mod config;
pub mod error;
pub mod send_message;
pub mod types;
pub mod verify;
pub mod webhook;

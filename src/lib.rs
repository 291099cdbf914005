//! Back-office client for the cabinet REST API.
//!
//! - [`api`] - HTTP client, session credential and error types
//! - [`models`] - records mirrored from backend rows
//! - [`views`] - one view model per back-office page, built on [`views::ListView`]
//! - [`cms`] - versioned CMS page payloads
//! - [`session`] - session persistence
//! - [`config`] - `~/.cabinet/config.toml`
//! - [`commands`] - CLI handlers

#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod cms;
pub mod commands;
pub mod config;
pub mod constants;
pub mod logging;
pub mod models;
pub mod paths;
pub mod session;
pub mod ui;
pub mod utils;
pub mod validation;
pub mod views;

//! Lunchvote Core - daily lunch menu voting service
//!
//! Employees vote for restaurant menus, restaurant owners publish menus and
//! administrators read the aggregated results. Exposed as a REST API backed
//! by MySQL.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod migration;
pub mod openapi;
pub mod policy;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};

//! Domain models for Lunchvote Core

pub mod common;
pub mod employee;
pub mod menu;
pub mod restaurant;
pub mod submission;
pub mod user;
pub mod vote;

pub use common::*;
pub use employee::*;
pub use menu::*;
pub use restaurant::*;
pub use submission::*;
pub use user::*;
pub use vote::*;

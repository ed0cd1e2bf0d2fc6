//! Library crate for usrform-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - User record types and id generation (`model`)
//! - Key-value storage backends (`storage`)
//! - The user store with persist-on-every-mutation semantics (`store`)
//! - Application state and update loop (`app`)
//! - Command-line options and logging setup (`cli`)
//! - Error and result types (`error`)
//! - In-memory search helpers (`search`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `usrform-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod cli;
pub mod error;
pub mod model;
pub mod search;
pub mod storage;
pub mod store;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
pub use model::{Tag, UserRecord, UserType};
pub use store::{STORAGE_KEY, UsersStore};

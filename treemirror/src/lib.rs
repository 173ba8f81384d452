//! Shared types of the tree mirror: errors, remote entries, locations and
//! configuration.

pub mod config;
pub mod entry;
pub mod loc;

mod error;

pub use crate::config::Config;
pub use crate::entry::{EntryKind, RemoteEntry, RemoteListing};
pub use crate::error::*;

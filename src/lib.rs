//! Hostman - hosts file editor with named entry groups.

pub mod backup;
pub mod cli;
pub mod config;
pub mod document;
mod edit;
pub mod error;
pub mod hosts;
pub mod line;
pub mod platform;
pub mod validate;

pub use document::{Document, Group, HostRecord, DEFAULT_GROUP};
pub use error::{HostsError, Result};
pub use hosts::HostsFile;

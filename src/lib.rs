//! jlinkw - jlink build step driver
//!
//! Builds Java runtime images with jlink against a JDK prepared by a
//! pluggable provider and cached under a shared root.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod jlink;
pub mod pipeline;
pub mod provider;
pub mod session;
pub mod text;
pub mod toolchain;
pub mod ui;

pub use error::{JlinkwError, JlinkwResult};

//! jlink invocation
//!
//! Module list derivation, command assembly and process execution.

pub mod command;
pub mod modules;
pub mod process;

pub use command::{build_command, clear_output_dir, CommandLine, ADD_MODULES_FLAG};
pub use modules::{build_module_list, join_modules};
pub use process::{classify, InterruptSignal, ProcessOutcome, ProcessRunner};

/// Name of the jlink executable inside a JDK
pub const JLINK_TOOL: &str = "jlink";

//! anchor-browse library - interactive musician catalog and job board shell
//!
//! - `command`: one-line command parsing
//! - `render`: plain-text views of lists, profiles, sections and jobs
//! - `shell`: the read/execute/reply loop over a browse session and job board

pub mod command;
pub mod render;
pub mod shell;

pub use command::{Command, CommandError, Target};
pub use shell::{Reply, Shell};

//! CLI command implementations

pub mod utils;

pub mod attachment;
pub mod completions;
pub mod config;
pub mod evidence;
pub mod issue;
pub mod issuelib;
pub mod node;
pub mod note;
pub mod project;
pub mod team;

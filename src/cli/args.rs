//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    attachment::AttachmentCommands, completions::CompletionsArgs, config::ConfigCommands,
    evidence::EvidenceCommands, issue::IssueCommands, issuelib::IssuelibCommands,
    node::NodeCommands, note::NoteCommands, project::ProjectCommands, team::TeamCommands,
};

#[derive(Parser)]
#[command(name = "dradis")]
#[command(author, version, about = "Dradis Pro command-line client")]
#[command(long_about = "Browse and edit projects, nodes, issues, evidence and notes on a Dradis Pro server through its REST API.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file (default: ~/.config/dradis/config.yaml)
    #[arg(long, global = true, env = "DRADIS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Team management
    #[command(subcommand)]
    Team(TeamCommands),

    /// Nodes (hosts and groupings) of a project
    #[command(subcommand)]
    Node(NodeCommands),

    /// Project issues
    #[command(subcommand)]
    Issue(IssueCommands),

    /// Evidence on a node
    #[command(subcommand)]
    Evidence(EvidenceCommands),

    /// Notes on a node
    #[command(subcommand)]
    Note(NoteCommands),

    /// Files attached to a node
    #[command(subcommand)]
    Attachment(AttachmentCommands),

    /// Issue library entries
    #[command(subcommand)]
    Issuelib(IssuelibCommands),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (table for list, details for show)
    #[default]
    Auto,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// Just IDs, one per line
    Id,
}

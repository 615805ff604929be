//! `dradis attachment` command - Files attached to a node

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::utils::{
    api_error, connect, list_format, print_serialized, resolve_node, resolve_project,
    table_config,
};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::GlobalOpts;
use crate::entities::Attachment;

#[derive(Subcommand, Debug)]
pub enum AttachmentCommands {
    /// List the files attached to a node
    List(ListArgs),

    /// Upload local files to a node
    Upload(UploadArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Project id or name
    pub project: String,

    /// Node id or label
    pub node: String,
}

#[derive(clap::Args, Debug)]
pub struct UploadArgs {
    /// Project id or name
    pub project: String,

    /// Node id or label
    pub node: String,

    /// Files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("filename", "FILENAME", 40),
    ColumnDef::new("link", "LINK", 70),
];

/// Run an attachment subcommand
pub fn run(cmd: AttachmentCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        AttachmentCommands::List(args) => run_list(args, global),
        AttachmentCommands::Upload(args) => run_upload(args, global),
    }
}

fn output(attachments: &[Attachment], global: &GlobalOpts) -> Result<()> {
    let format = list_format(global);
    if print_serialized(attachments, format)? {
        return Ok(());
    }
    if attachments.is_empty() {
        println!("No attachments found.");
        return Ok(());
    }

    // Attachments have no numeric id; `--format id` prints filenames
    let rows = attachments.iter().map(|a| {
        let link = match &a.link {
            Some(link) => CellValue::Text(link.clone()),
            None => CellValue::Empty,
        };
        TableRow::new(&a.filename)
            .cell("filename", CellValue::Text(a.filename.clone()))
            .cell("link", link)
    });
    TableFormatter::new(COLUMNS, "attachment")
        .with_config(table_config(global))
        .output(rows, format);
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;
    let node = resolve_node(&client, &project, &args.node)?;
    let attachments = client.attachments(&node).map_err(api_error)?;
    output(&attachments, global)
}

fn run_upload(args: UploadArgs, global: &GlobalOpts) -> Result<()> {
    for file in &args.files {
        if !file.is_file() {
            return Err(miette::miette!("Not a file: {}", file.display()));
        }
    }

    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;
    let node = resolve_node(&client, &project, &args.node)?;
    let uploaded = client
        .upload_attachments(&node, &args.files)
        .map_err(api_error)?;

    if !global.quiet {
        eprintln!(
            "{} Uploaded {} file(s) to {}",
            style("✓").green(),
            uploaded.len(),
            style(&node.label).cyan()
        );
    }
    output(&uploaded, global)
}

//! `dradis note` command - Notes on a node

use clap::Subcommand;
use miette::Result;

use crate::cli::commands::utils::{
    api_error, connect, list_format, print_serialized, resolve_node, resolve_project,
    table_config,
};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::Note;

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// List the notes on a node
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Project id or name
    pub project: String,

    /// Node id or label
    pub node: String,

    /// Only notes with this title (case-insensitive)
    #[arg(long)]
    pub title: Option<String>,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 8),
    ColumnDef::new("category", "CATEGORY", 10),
    ColumnDef::new("title", "TITLE", 60),
];

/// Run a note subcommand
pub fn run(cmd: NoteCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        NoteCommands::List(args) => run_list(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;
    let mut node = resolve_node(&client, &project, &args.node)?;
    let format = list_format(global);

    // The node payload may not embed notes; the notes endpoint always does
    node.notes = client.notes(&node).map_err(api_error)?;
    let notes = match args.title {
        Some(ref title) => node.notes_by_title(title),
        None => node.notes.iter().collect(),
    };
    print_notes(&notes, format, global)
}

fn print_notes(
    notes: &[&Note],
    format: OutputFormat,
    global: &GlobalOpts,
) -> Result<()> {
    if print_serialized(notes, format)? {
        return Ok(());
    }
    if notes.is_empty() {
        println!("No notes found.");
        return Ok(());
    }

    let rows = notes.iter().map(|note| {
        TableRow::new(note.id)
            .cell("id", CellValue::Id(note.id))
            .cell("category", CellValue::Type(note.category_id.to_string()))
            .cell("title", CellValue::Text(note.title.clone()))
    });
    TableFormatter::new(COLUMNS, "note")
        .with_config(table_config(global))
        .output(rows, format);
    Ok(())
}

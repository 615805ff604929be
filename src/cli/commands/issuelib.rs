//! `dradis issuelib` command - Issue library entries

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::utils::{api_error, connect, list_format, print_serialized, table_config};
use crate::cli::table::{fields_table, CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum IssuelibCommands {
    /// List the issue library
    List,

    /// Show an issue library entry
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Entry id
    pub id: u64,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 8),
    ColumnDef::new("title", "TITLE", 60),
    ColumnDef::new("state", "STATE", 7),
];

/// Run an issuelib subcommand
pub fn run(cmd: IssuelibCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        IssuelibCommands::List => run_list(global),
        IssuelibCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let entries = client.issue_library().map_err(api_error)?;
    let format = list_format(global);

    if print_serialized(&entries, format)? {
        return Ok(());
    }
    if entries.is_empty() {
        println!("No issue library entries found.");
        return Ok(());
    }

    let rows = entries.iter().map(|entry| {
        TableRow::new(entry.id)
            .cell("id", CellValue::Id(entry.id))
            .cell("title", CellValue::Text(entry.title.clone()))
            .cell("state", CellValue::Number(entry.state as i64))
    });
    TableFormatter::new(COLUMNS, "entry")
        .with_config(table_config(global))
        .output(rows, format);
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let entry = client.issue_library_entry(args.id).map_err(api_error)?;

    if print_serialized(&entry, global.format)? {
        return Ok(());
    }
    if global.format == OutputFormat::Id {
        println!("{}", entry.id);
        return Ok(());
    }

    println!(
        "{} {}",
        style(entry.id).cyan(),
        style(&entry.title).bold()
    );
    println!("{}", fields_table(&entry.fields));
    Ok(())
}

//! `dradis issue` command - Project issues

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::utils::{
    api_error, connect, list_format, parse_field_args, print_serialized, resolve_issue,
    resolve_project, table_config,
};
use crate::cli::table::{fields_table, CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum IssueCommands {
    /// List the issues of a project
    List(ListArgs),

    /// Show an issue's fields
    Show(ShowArgs),

    /// Create an issue from fields
    Create(CreateArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Project id or name
    pub project: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Project id or name
    pub project: String,

    /// Issue id or title
    pub issue: String,
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Project id or name
    pub project: String,

    /// Issue field as KEY=VALUE (repeatable, order is kept)
    #[arg(long = "field", short = 'F', required = true)]
    pub fields: Vec<String>,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 8),
    ColumnDef::new("title", "TITLE", 60),
    ColumnDef::new("updated", "UPDATED", 12),
];

/// Run an issue subcommand
pub fn run(cmd: IssueCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        IssueCommands::List(args) => run_list(args, global),
        IssueCommands::Show(args) => run_show(args, global),
        IssueCommands::Create(args) => run_create(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;
    let issues = client.issues(&project).map_err(api_error)?;
    let format = list_format(global);

    if print_serialized(&issues, format)? {
        return Ok(());
    }
    if issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }

    let rows = issues.iter().map(|issue| {
        TableRow::new(issue.id)
            .cell("id", CellValue::Id(issue.id))
            .cell("title", CellValue::Text(issue.title.clone()))
            .cell("updated", CellValue::Date(issue.updated()))
    });
    TableFormatter::new(COLUMNS, "issue")
        .with_config(table_config(global))
        .output(rows, format);
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;
    let issue = resolve_issue(&client, &project, &args.issue)?;

    if print_serialized(&issue, global.format)? {
        return Ok(());
    }
    if global.format == OutputFormat::Id {
        println!("{}", issue.id);
        return Ok(());
    }

    println!(
        "{} {}",
        style(issue.id).cyan(),
        style(&issue.title).bold()
    );
    println!("{}", fields_table(&issue.fields));
    Ok(())
}

fn run_create(args: CreateArgs, global: &GlobalOpts) -> Result<()> {
    let fields = parse_field_args(&args.fields)?;
    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;
    let issue = client.create_issue(&project, &fields).map_err(api_error)?;

    if print_serialized(&issue, global.format)? {
        return Ok(());
    }
    if global.format == OutputFormat::Id || global.quiet {
        println!("{}", issue.id);
    } else {
        println!(
            "{} Created issue {} {}",
            style("✓").green(),
            style(issue.id).cyan(),
            issue.title
        );
    }
    Ok(())
}

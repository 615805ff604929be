//! `dradis team` command - Teams and the projects they own

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::utils::{
    api_error, connect, list_format, print_serialized, resolve_team, table_config,
};
use crate::cli::table::{print_details, CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// List all teams
    List,

    /// Show a team and its projects
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Team id or name
    pub team: String,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 8),
    ColumnDef::new("name", "NAME", 40),
    ColumnDef::new("since", "SINCE", 12),
    ColumnDef::new("projects", "PROJECTS", 10),
];

/// Run a team subcommand
pub fn run(cmd: TeamCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TeamCommands::List => run_list(global),
        TeamCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let teams = client.teams().map_err(api_error)?;
    let format = list_format(global);

    if print_serialized(&teams, format)? {
        return Ok(());
    }
    if teams.is_empty() {
        println!("No teams found.");
        return Ok(());
    }

    let rows = teams.iter().map(|team| {
        let since = match team.since() {
            Some(date) => CellValue::Text(date.to_string()),
            None => CellValue::Empty,
        };
        TableRow::new(team.id)
            .cell("id", CellValue::Id(team.id))
            .cell("name", CellValue::Text(team.name.clone()))
            .cell("since", since)
            .cell("projects", CellValue::Number(team.projects.len() as i64))
    });
    TableFormatter::new(COLUMNS, "team")
        .with_config(table_config(global))
        .output(rows, format);
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let team = resolve_team(&client, &args.team)?;

    if print_serialized(&team, global.format)? {
        return Ok(());
    }
    if global.format == OutputFormat::Id {
        println!("{}", team.id);
        return Ok(());
    }

    print_details(
        &team.name,
        &[
            ("ID", team.id.to_string()),
            (
                "Since",
                team.since().map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            ),
            ("Created", team.created_at.clone().unwrap_or_default()),
        ],
    );

    if !team.projects.is_empty() {
        println!();
        println!("{}", style("Projects").bold());
        for project in &team.projects {
            println!("  {} {}", style(project.id).cyan(), project.name);
        }
    }
    Ok(())
}

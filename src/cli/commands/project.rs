//! `dradis project` command - Projects visible to the API user

use clap::Subcommand;
use miette::Result;

use crate::cli::commands::utils::{
    api_error, connect, list_format, print_serialized, resolve_project, table_config,
};
use crate::cli::table::{print_details, CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::Project;

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List all projects
    List,

    /// Show a project's details
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Project id or name
    pub project: String,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 8),
    ColumnDef::new("name", "NAME", 40),
    ColumnDef::new("team", "TEAM", 24),
    ColumnDef::new("updated", "UPDATED", 12),
];

/// Run a project subcommand
pub fn run(cmd: ProjectCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProjectCommands::List => run_list(global),
        ProjectCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let projects = client.projects().map_err(api_error)?;
    let format = list_format(global);

    if print_serialized(&projects, format)? {
        return Ok(());
    }
    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    let rows = projects.iter().map(project_row);
    TableFormatter::new(COLUMNS, "project")
        .with_config(table_config(global))
        .output(rows, format);
    Ok(())
}

fn project_row(project: &Project) -> TableRow {
    let team = match &project.client {
        Some(team) => CellValue::Text(team.name.clone()),
        None => CellValue::Empty,
    };
    TableRow::new(project.id)
        .cell("id", CellValue::Id(project.id))
        .cell("name", CellValue::Text(project.name.clone()))
        .cell("team", team)
        .cell("updated", CellValue::Date(project.updated()))
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;

    if print_serialized(&project, global.format)? {
        return Ok(());
    }
    if global.format == OutputFormat::Id {
        println!("{}", project.id);
        return Ok(());
    }

    let emails = |members: &[crate::entities::Member]| {
        members
            .iter()
            .map(|m| m.email.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    print_details(
        &project.name,
        &[
            ("ID", project.id.to_string()),
            (
                "Team",
                project
                    .client
                    .as_ref()
                    .map(|c| format!("{} ({})", c.name, c.id))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Authors", emails(&project.authors)),
            ("Owners", emails(&project.owners)),
            ("Created", project.created_at.clone().unwrap_or_default()),
            ("Updated", project.updated_at.clone().unwrap_or_default()),
        ],
    );
    Ok(())
}

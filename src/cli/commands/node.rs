//! `dradis node` command - Nodes of a project

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::utils::{
    api_error, connect, list_format, print_serialized, resolve_node, resolve_project,
    table_config,
};
use crate::cli::table::{print_details, CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::Node;

#[derive(Subcommand, Debug)]
pub enum NodeCommands {
    /// List the nodes of a project
    List(ListArgs),

    /// Show a node with its evidence and notes
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Project id or name
    pub project: String,

    /// Only nodes whose label contains this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Project id or name
    pub project: String,

    /// Node id or label
    pub node: String,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 8),
    ColumnDef::new("label", "LABEL", 40),
    ColumnDef::new("type", "TYPE", 10),
    ColumnDef::new("parent", "PARENT", 8),
    ColumnDef::new("evidence", "EVIDENCE", 10),
    ColumnDef::new("notes", "NOTES", 7),
];

/// Run a node subcommand
pub fn run(cmd: NodeCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        NodeCommands::List(args) => run_list(args, global),
        NodeCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;
    let mut nodes = client.nodes(&project).map_err(api_error)?;
    let format = list_format(global);

    if let Some(ref search) = args.search {
        let search = search.to_lowercase();
        nodes.retain(|n| n.label.to_lowercase().contains(&search));
    }

    if print_serialized(&nodes, format)? {
        return Ok(());
    }
    if nodes.is_empty() {
        println!("No nodes found.");
        return Ok(());
    }

    TableFormatter::new(COLUMNS, "node")
        .with_config(table_config(global))
        .output(nodes.iter().map(node_row), format);
    Ok(())
}

fn node_row(node: &Node) -> TableRow {
    let parent = match node.parent_id {
        Some(id) => CellValue::Id(id),
        None => CellValue::Empty,
    };
    TableRow::new(node.id)
        .cell("id", CellValue::Id(node.id))
        .cell("label", CellValue::Text(node.label.clone()))
        .cell("type", CellValue::Type(node.type_id.to_string()))
        .cell("parent", parent)
        .cell("evidence", CellValue::Number(node.evidence.len() as i64))
        .cell("notes", CellValue::Number(node.notes.len() as i64))
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;
    let node = resolve_node(&client, &project, &args.node)?;

    if print_serialized(&node, global.format)? {
        return Ok(());
    }
    if global.format == OutputFormat::Id {
        println!("{}", node.id);
        return Ok(());
    }

    print_details(
        &node.label,
        &[
            ("ID", node.id.to_string()),
            ("Project", format!("{} ({})", project.name, project.id)),
            ("Type", node.type_id.to_string()),
            (
                "Parent",
                node.parent_id.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            ),
            (
                "Position",
                node.position.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            ),
        ],
    );

    if !node.evidence.is_empty() {
        println!();
        println!("{}", style("Evidence").bold());
        for evidence in &node.evidence {
            println!(
                "  {} {}",
                style(evidence.id).cyan(),
                evidence.issue.title
            );
        }
    }
    if !node.notes.is_empty() {
        println!();
        println!("{}", style("Notes").bold());
        for note in &node.notes {
            println!("  {} {}", style(note.id).cyan(), note.title);
        }
    }
    Ok(())
}

//! `dradis evidence` command - Evidence on a node

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::utils::{
    api_error, confirm, connect, list_format, parse_field_args, print_serialized, resolve_issue,
    resolve_node, resolve_project, table_config,
};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum EvidenceCommands {
    /// List the evidence on a node
    List(ListArgs),

    /// Create evidence for an issue on a node
    Create(CreateArgs),

    /// Delete evidence from a node
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Project id or name
    pub project: String,

    /// Node id or label
    pub node: String,

    /// Only evidence with this exact field value, as KEY=VALUE
    #[arg(long)]
    pub field: Option<String>,

    /// Only evidence for issues with this title (case-insensitive)
    #[arg(long)]
    pub issue: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Project id or name
    pub project: String,

    /// Node id or label
    pub node: String,

    /// Issue id or title the evidence documents
    pub issue: String,

    /// Evidence field as KEY=VALUE (repeatable, order is kept)
    #[arg(long = "field", short = 'F', required = true)]
    pub fields: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Project id or name
    pub project: String,

    /// Node id or label
    pub node: String,

    /// Evidence id
    pub id: u64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 8),
    ColumnDef::new("issue", "ISSUE", 40),
    ColumnDef::new("fields", "FIELDS", 50),
];

/// Run an evidence subcommand
pub fn run(cmd: EvidenceCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        EvidenceCommands::List(args) => run_list(args, global),
        EvidenceCommands::Create(args) => run_create(args, global),
        EvidenceCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;
    let node = resolve_node(&client, &project, &args.node)?;
    let format = list_format(global);

    let mut selected: Vec<_> = match args.field {
        Some(ref filter) => {
            let (key, value) = filter
                .split_once('=')
                .ok_or_else(|| miette::miette!("Invalid --field '{}': expected KEY=VALUE", filter))?;
            node.evidence_by_field(key.trim(), value)
        }
        None => node.evidence.iter().collect(),
    };
    if let Some(ref title) = args.issue {
        let matching: Vec<u64> = node.evidence_by_issue_title(title).iter().map(|e| e.id).collect();
        selected.retain(|e| matching.contains(&e.id));
    }

    if print_serialized(&selected, format)? {
        return Ok(());
    }
    if selected.is_empty() {
        println!("No evidence found.");
        return Ok(());
    }

    let rows = selected.iter().map(|evidence| {
        let keys: Vec<&str> = evidence.fields.keys().collect();
        TableRow::new(evidence.id)
            .cell("id", CellValue::Id(evidence.id))
            .cell("issue", CellValue::Text(evidence.issue.title.clone()))
            .cell("fields", CellValue::Text(keys.join(", ")))
    });
    TableFormatter::new(COLUMNS, "evidence")
        .with_config(table_config(global))
        .output(rows, format);
    Ok(())
}

fn run_create(args: CreateArgs, global: &GlobalOpts) -> Result<()> {
    let fields = parse_field_args(&args.fields)?;
    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;
    let mut node = resolve_node(&client, &project, &args.node)?;
    let issue = resolve_issue(&client, &project, &args.issue)?;

    let evidence = client
        .create_evidence(&mut node, &issue, &fields)
        .map_err(api_error)?;

    if print_serialized(&evidence, global.format)? {
        return Ok(());
    }
    if global.format == OutputFormat::Id || global.quiet {
        println!("{}", evidence.id);
    } else {
        println!(
            "{} Created evidence {} for {} on {} ({} on node)",
            style("✓").green(),
            style(evidence.id).cyan(),
            style(&issue.title).yellow(),
            node.label,
            node.evidence.len()
        );
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let client = connect(global)?;
    let project = resolve_project(&client, &args.project)?;
    let mut node = resolve_node(&client, &project, &args.node)?;
    let evidence = node.evidence_by_id(args.id).map_err(api_error)?;

    let prompt = format!(
        "Delete evidence {} ({}) from {}?",
        evidence.id, evidence.issue.title, node.label
    );
    if !confirm(&prompt, args.yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    client
        .delete_evidence(&mut node, args.id)
        .map_err(api_error)?;
    if !global.quiet {
        println!(
            "{} Deleted evidence {} ({} left on node)",
            style("✓").green(),
            style(args.id).cyan(),
            node.evidence.len()
        );
    }
    Ok(())
}

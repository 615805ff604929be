//! Shared utilities for CLI commands

use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::api::DradisClient;
use crate::cli::table::TableConfig;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::fields::OrderedFieldMap;
use crate::core::transport::Transport;
use crate::core::{Config, DradisError};
use crate::entities::{Issue, Node, Project, Team};

/// Turn a client error into a diagnostic
pub fn api_error(e: DradisError) -> miette::Report {
    miette::miette!("{}", e)
}

/// Effective configuration for this invocation
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    Config::load_with(global.config.as_deref()).map_err(|e| miette::miette!("{}", e))
}

/// Client for the configured server
pub fn connect(global: &GlobalOpts) -> Result<DradisClient> {
    let config = load_config(global)?;
    let client = DradisClient::from_config(&config).map_err(|e| {
        miette::miette!(
            help = "set DRADIS_URL and DRADIS_API_KEY, or pass --config <file>",
            "{}",
            e
        )
    })?;
    tracing::info!(url = config.url.as_deref().unwrap_or_default(), "connected");
    Ok(client)
}

/// List commands print a table unless another format was asked for
pub fn list_format(global: &GlobalOpts) -> OutputFormat {
    match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    }
}

pub fn table_config(global: &GlobalOpts) -> TableConfig {
    if global.quiet {
        TableConfig::for_pipe()
    } else {
        TableConfig::default()
    }
}

/// Print JSON or YAML if that format was requested. Returns false for
/// the other formats so the caller renders them itself.
pub fn print_serialized<S: Serialize + ?Sized>(value: &S, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            println!("{}", json);
            Ok(true)
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(value).into_diagnostic()?;
            print!("{}", yaml);
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Look a project up by numeric id, or else by name
pub fn resolve_project<T: Transport>(client: &DradisClient<T>, key: &str) -> Result<Project> {
    let found = match key.parse::<u64>() {
        Ok(id) => client.project(id),
        Err(_) => client.project_by_name(key),
    };
    found.map_err(api_error)
}

pub fn resolve_team<T: Transport>(client: &DradisClient<T>, key: &str) -> Result<Team> {
    let found = match key.parse::<u64>() {
        Ok(id) => client.team(id),
        Err(_) => client.team_by_name(key),
    };
    found.map_err(api_error)
}

/// Look a node up by numeric id, or else by label
pub fn resolve_node<T: Transport>(
    client: &DradisClient<T>,
    project: &Project,
    key: &str,
) -> Result<Node> {
    let found = match key.parse::<u64>() {
        Ok(id) => client.node(project, id),
        Err(_) => client.node_by_label(project, key),
    };
    found.map_err(api_error)
}

/// Look an issue up by numeric id, or else by title
pub fn resolve_issue<T: Transport>(
    client: &DradisClient<T>,
    project: &Project,
    key: &str,
) -> Result<Issue> {
    let found = match key.parse::<u64>() {
        Ok(id) => client.issue(project, id),
        Err(_) => client.issue_by_title(project, key),
    };
    found.map_err(api_error)
}

/// Parse repeated `--field Key=Value` arguments, keeping their order.
/// A literal `\n` in a value becomes a line break.
pub fn parse_field_args(args: &[String]) -> Result<OrderedFieldMap> {
    let mut fields = OrderedFieldMap::new();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| miette::miette!("Invalid field '{}': expected KEY=VALUE", arg))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(miette::miette!("Invalid field '{}': empty key", arg));
        }
        fields.set(key, value.replace("\\n", "\r\n"));
    }
    if fields.is_empty() {
        return Err(miette::miette!("At least one --field KEY=VALUE is required"));
    }
    Ok(fields)
}

/// Ask before a destructive action; `assume_yes` skips the prompt
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_args_keeps_order() {
        let args = vec![
            "Title=Weak TLS".to_string(),
            "Port=443/tcp".to_string(),
            "Output=line1\\nline2".to_string(),
        ];
        let fields = parse_field_args(&args).unwrap();
        let keys: Vec<&str> = fields.keys().collect();
        assert_eq!(keys, vec!["Title", "Port", "Output"]);
        assert_eq!(fields.get("Output"), Some("line1\r\nline2"));
    }

    #[test]
    fn test_parse_field_args_value_may_contain_equals() {
        let fields = parse_field_args(&["Query=a=b".to_string()]).unwrap();
        assert_eq!(fields.get("Query"), Some("a=b"));
    }

    #[test]
    fn test_parse_field_args_rejects_bad_input() {
        assert!(parse_field_args(&["NoEquals".to_string()]).is_err());
        assert!(parse_field_args(&["=value".to_string()]).is_err());
        assert!(parse_field_args(&[]).is_err());
    }

    #[test]
    fn test_confirm_assume_yes() {
        assert!(confirm("Delete?", true).unwrap());
    }
}

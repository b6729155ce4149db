//! mcp-manager - per-project MCP servers for Claude Desktop
//!
//! Usage:
//!   mcp-manager config set-path <path>   # Shared MCP server script
//!   mcp-manager init                     # Write .mcp-config.json here
//!   mcp-manager add . --restart          # Register this project
//!   mcp-manager list                     # Show registered servers

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcp_manager_core::commands::{
    AddOptions, ClearOptions, McpManager, RemoveOptions, ServerSummary, StatusReport,
};
use mcp_manager_core::config::DEFAULT_BACKUP_RETENTION;
use mcp_manager_core::process::{HOST_APP_BUNDLE, RestartOutcome};

#[derive(Parser)]
#[command(name = "mcp-manager", version)]
#[command(about = "Manage Claude Desktop MCP servers per project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage mcp-manager settings
    Config(ConfigArgs),

    /// Create .mcp-config.json in the current directory
    Init {
        /// Show the --restart variant in the follow-up hint
        #[arg(long)]
        restart: bool,
    },

    /// Register a project's MCP server
    Add {
        /// Project directory containing .mcp-config.json
        project_path: String,
        /// Restart Claude Desktop afterwards (macOS only)
        #[arg(long, short)]
        restart: bool,
    },

    /// Unregister a project's MCP server
    #[command(alias = "rm")]
    Remove {
        /// Project directory containing .mcp-config.json
        project_path: String,
        /// Restart Claude Desktop afterwards (macOS only)
        #[arg(long, short)]
        restart: bool,
    },

    /// List registered MCP servers
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove every registered MCP server
    Clear {
        /// Restart Claude Desktop afterwards (macOS only)
        #[arg(long, short)]
        restart: bool,
    },

    /// Show how many servers are registered
    Status {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Restart Claude Desktop (macOS only)
    Restart,

    /// Manage config backups
    Backup(BackupArgs),
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Set the shared MCP server script path
    #[command(alias = "set-mcp-server")]
    SetPath {
        /// Path to the MCP server entry point
        path: String,
    },

    /// Show current settings
    Show,
}

#[derive(Args)]
struct BackupArgs {
    #[command(subcommand)]
    command: BackupSubcommand,
}

#[derive(Subcommand)]
enum BackupSubcommand {
    /// List backups, newest first
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Delete old backups
    Clean {
        /// Number of backups to keep
        #[arg(long, short, default_value_t = DEFAULT_BACKUP_RETENTION)]
        keep: usize,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run_cli(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_cli(command: Commands) -> Result<()> {
    let manager = McpManager::with_defaults()?;

    match command {
        Commands::Config(args) => run_config(&manager, args)?,
        Commands::Init { restart } => run_init(&manager, restart)?,
        Commands::Add {
            project_path,
            restart,
        } => run_add(&manager, &project_path, restart)?,
        Commands::Remove {
            project_path,
            restart,
        } => run_remove(&manager, &project_path, restart)?,
        Commands::List { format } => {
            let servers = manager.list()?;
            match format {
                OutputFormat::Table => print_server_table(&servers),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&servers)?),
            }
        }
        Commands::Clear { restart } => run_clear(&manager, restart)?,
        Commands::Status { format } => {
            let report = manager.status()?;
            match format {
                OutputFormat::Table => print_status(&report),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Commands::Restart => {
            println!("Restarting Claude Desktop...");
            print_restart(&manager.restart());
        }
        Commands::Backup(args) => run_backup(&manager, args)?,
    }
    Ok(())
}

fn run_config(manager: &McpManager, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigSubcommand::SetPath { path } => {
            let saved = manager.set_server_path(&path)?;
            println!("✓ MCP server path set");
            println!("  {}", saved.display());
        }
        ConfigSubcommand::Show => {
            let report = manager.show_settings()?;
            println!("mcp-manager settings ({})", report.settings_path.display());
            match report.server_path {
                None => {
                    println!("⚠ MCP server path is not set");
                    println!("  Set it with: mcp-manager config set-path <path>");
                }
                Some(path) => {
                    println!("MCP server path: {}", path.display());
                    if report.exists {
                        println!("✓ Path exists");
                    } else {
                        println!("⚠ Path does not exist");
                    }
                }
            }
        }
    }
    Ok(())
}

fn run_init(manager: &McpManager, restart: bool) -> Result<()> {
    let report = manager.init_project()?;

    if !report.changed {
        println!("• .mcp-config.json already exists");
        println!("  {}", report.descriptor_path.display());
        return Ok(());
    }

    if let Some(descriptor) = &report.descriptor {
        println!("  Runner: {}", descriptor.config.command);
        if let Some(server) = descriptor.config.args.first() {
            println!("  MCP server: {server}");
        }
    }
    println!("✓ Created .mcp-config.json");
    println!("  Project: {}", report.project_name);
    println!("  File: {}", report.descriptor_path.display());
    println!();
    println!("Activate it with:");
    println!("  mcp-manager add .{}", if restart { " --restart" } else { "" });
    Ok(())
}

fn run_add(manager: &McpManager, project_path: &str, restart: bool) -> Result<()> {
    let report = manager.add(project_path, &AddOptions::new().with_restart(restart))?;

    println!("Project: {}", report.project_path.display());
    if !report.changed {
        println!("• '{}' is already registered", report.name);
        return Ok(());
    }

    for warning in &report.warnings {
        println!("  ⚠ {warning}");
    }
    print_backup(report.backup.as_deref());
    println!("✓ Added '{}'", report.name);
    finish_mutation(report.restart.as_ref(), "mcp-manager add . --restart");
    Ok(())
}

fn run_remove(manager: &McpManager, project_path: &str, restart: bool) -> Result<()> {
    let report = manager.remove(project_path, &RemoveOptions::new().with_restart(restart))?;

    println!("Project: {}", report.project_path.display());
    if !report.changed {
        println!("• '{}' is not registered", report.name);
        return Ok(());
    }

    print_backup(report.backup.as_deref());
    println!("✓ Removed '{}'", report.name);
    finish_mutation(report.restart.as_ref(), "mcp-manager remove . --restart");
    Ok(())
}

fn run_clear(manager: &McpManager, restart: bool) -> Result<()> {
    let report = manager.clear(&ClearOptions::new().with_restart(restart))?;

    if report.removed == 0 {
        println!("No MCP servers to remove");
        return Ok(());
    }

    print_backup(report.backup.as_deref());
    println!("✓ Removed all {} MCP server(s)", report.removed);
    finish_mutation(report.restart.as_ref(), "mcp-manager clear --restart");
    Ok(())
}

fn run_backup(manager: &McpManager, args: BackupArgs) -> Result<()> {
    match args.command {
        BackupSubcommand::List { format } => {
            let backups = manager.list_backups()?;
            match format {
                OutputFormat::Table => {
                    if backups.is_empty() {
                        println!("No backups found");
                        return Ok(());
                    }
                    println!("Backups (newest first):");
                    for (idx, path) in backups.iter().enumerate() {
                        println!("  {}. {}", idx + 1, file_name(path));
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&backups)?),
            }
        }
        BackupSubcommand::Clean { keep } => {
            let report = manager.clean_backups(keep)?;
            if report.removed == 0 {
                println!("Nothing to clean ({} backup(s) kept)", report.remaining);
            } else {
                println!(
                    "✓ Deleted {} old backup(s), {} kept",
                    report.removed, report.remaining
                );
            }
        }
    }
    Ok(())
}

fn print_server_table(servers: &[ServerSummary]) {
    if servers.is_empty() {
        println!("No MCP servers registered");
        return;
    }

    println!("Registered MCP servers:");
    for (idx, server) in servers.iter().enumerate() {
        println!();
        println!("{}. {}", idx + 1, server.name);
        println!("   Command: {}", server.command);
        println!("   Args: {}", server.args.join(" "));
        if let Some(count) = server.env_count {
            println!("   Env vars: {count}");
        }
    }
}

fn print_status(report: &StatusReport) {
    println!("Config: {}", report.config_path.display());
    println!("Registered: {}", report.total);
    if report.total > 0 {
        println!();
        println!("Servers:");
        for (idx, name) in report.names.iter().enumerate() {
            println!("  {}. {}", idx + 1, name);
        }
    }
}

fn print_backup(backup: Option<&Path>) {
    if let Some(path) = backup {
        println!("  Backup: {}", file_name(path));
    }
}

fn finish_mutation(restart: Option<&RestartOutcome>, restart_hint: &str) {
    match restart {
        Some(outcome) => {
            println!();
            println!("Restarting Claude Desktop...");
            print_restart(outcome);
        }
        None => {
            println!("Restart Claude Desktop to apply the change");
            println!("  or run with --restart: {restart_hint}");
        }
    }
}

fn print_restart(outcome: &RestartOutcome) {
    match outcome {
        RestartOutcome::Restarted { forced, .. } => {
            if *forced {
                println!("  ⚠ Claude Desktop did not quit in time and was force-stopped");
            }
            println!("✓ Claude Desktop restarted");
        }
        RestartOutcome::LaunchFailed { reason } => {
            eprintln!("✗ Failed to start Claude Desktop: {reason}");
            println!("  Start it manually: {HOST_APP_BUNDLE}");
        }
        RestartOutcome::Unsupported => {
            println!("⚠ Automatic restart is only supported on macOS");
            println!("  Restart Claude Desktop manually");
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

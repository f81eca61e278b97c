//! CLI definitions and command routing.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, HostmanPaths, HostsSettings};
use crate::hosts::HostsFile;

#[derive(Parser)]
#[command(name = "hostman")]
#[command(about = "Edit the hosts file with named groups of entries")]
pub struct Cli {
    /// Hosts file to edit instead of the system one
    #[arg(long, global = true)]
    pub hosts_file: Option<PathBuf>,

    /// Log level when HOSTMAN_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List host entries in file order
    List {
        /// Only entries in this group
        #[arg(long)]
        group: Option<String>,
        /// Print JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },

    /// Add an entry, optionally into a group
    Add {
        address: String,
        domain: String,
        #[arg(long)]
        comment: Option<String>,
        /// Target group (default: end of file)
        #[arg(long)]
        group: Option<String>,
    },

    /// Remove an entry (active or commented out)
    Remove { address: String, domain: String },

    /// Comment out an active entry or re-activate a commented one
    Toggle { address: String, domain: String },

    /// Replace address/domain/comment of an entry, keeping its state
    Update {
        old_address: String,
        old_domain: String,
        address: String,
        domain: String,
        #[arg(long)]
        comment: Option<String>,
    },

    /// Move an entry to the end of another group
    Move {
        address: String,
        domain: String,
        group: String,
    },

    /// Manage groups (list, create, rename, delete)
    Group {
        #[command(subcommand)]
        cmd: GroupCmd,
    },

    /// Manage hosts file backups (create, list)
    Backup {
        #[command(subcommand)]
        cmd: BackupCmd,
    },

    /// Check an address or domain; exits non-zero when invalid
    Validate {
        #[command(subcommand)]
        cmd: ValidateCmd,
    },

    /// Show or change the stored config.toml
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Subcommand)]
pub enum GroupCmd {
    /// List groups with active/total counts
    List {
        #[arg(long)]
        json: bool,
    },
    /// Append an empty group block
    Create { name: String },
    /// Rename a group's markers
    Rename { old: String, new: String },
    /// Delete a group block and everything inside it
    Delete { name: String },
}

#[derive(Subcommand)]
pub enum BackupCmd {
    /// Copy the hosts file to the backup directory, or to PATH
    Create { path: Option<PathBuf> },
    /// List snapshots in the backup directory, newest first
    List,
}

#[derive(Subcommand)]
pub enum ValidateCmd {
    /// IPv4 dotted quad or full 8-group IPv6
    Address { value: String },
    /// Hostname
    Domain { value: String },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Print resolved hosts file and backup directory
    Show,
    /// Store hosts file and/or backup directory in config.toml
    Set {
        #[arg(long = "hosts")]
        hosts: Option<PathBuf>,
        #[arg(long)]
        backup_dir: Option<PathBuf>,
    },
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let paths = HostmanPaths::default_paths();

    let hosts_file = cli.hosts_file;
    let open = || -> Result<HostsFile> {
        Ok(HostsFile::new(HostsSettings::resolve(&paths, hosts_file.clone())?))
    };

    match cli.command {
        Commands::List { group, json } => cmd_list(&open()?, group.as_deref(), json),
        Commands::Add {
            address,
            domain,
            comment,
            group,
        } => {
            open()?.add_host(&address, &domain, comment.as_deref(), group.as_deref())?;
            println!("Added host: {address} {domain}");
            Ok(())
        }
        Commands::Remove { address, domain } => {
            open()?.remove_host(&address, &domain)?;
            println!("Removed host: {address} {domain}");
            Ok(())
        }
        Commands::Toggle { address, domain } => {
            let active = open()?.toggle_host(&address, &domain)?;
            let state = if active { "enabled" } else { "disabled" };
            println!("Host {address} {domain} {state}");
            Ok(())
        }
        Commands::Update {
            old_address,
            old_domain,
            address,
            domain,
            comment,
        } => {
            open()?.update_host(&old_address, &old_domain, &address, &domain, comment.as_deref())?;
            println!("Updated host: {address} {domain}");
            Ok(())
        }
        Commands::Move {
            address,
            domain,
            group,
        } => {
            open()?.move_host_to_group(&address, &domain, &group)?;
            println!("Moved host {address} {domain} to {group}");
            Ok(())
        }
        Commands::Group { cmd } => cmd_group(&open()?, cmd),
        Commands::Backup { cmd } => cmd_backup(&open()?, cmd),
        Commands::Validate { cmd } => cmd_validate(cmd),
        Commands::Config { cmd } => cmd_config(&paths, hosts_file.clone(), cmd),
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("HOSTMAN_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_list(hosts: &HostsFile, group: Option<&str>, json: bool) -> Result<()> {
    let records: Vec<_> = hosts
        .list_hosts()?
        .into_iter()
        .filter(|r| group.map_or(true, |g| r.group == g))
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for r in &records {
            let state = if r.is_active { "on" } else { "off" };
            println!("{state}\t{}\t{}\t{}\t{}", r.address, r.domain, r.group, r.comment);
        }
    }
    Ok(())
}

fn cmd_group(hosts: &HostsFile, cmd: GroupCmd) -> Result<()> {
    match cmd {
        GroupCmd::List { json } => {
            let groups = hosts.list_groups()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                for g in &groups {
                    println!("{}\t{}/{}", g.name, g.active_count, g.members.len());
                }
            }
            Ok(())
        }
        GroupCmd::Create { name } => {
            hosts.create_group(&name)?;
            println!("Created group: {name}");
            Ok(())
        }
        GroupCmd::Rename { old, new } => {
            hosts.rename_group(&old, &new)?;
            println!("Renamed group: {old} -> {new}");
            Ok(())
        }
        GroupCmd::Delete { name } => {
            hosts.delete_group(&name)?;
            println!("Deleted group: {name}");
            Ok(())
        }
    }
}

fn cmd_backup(hosts: &HostsFile, cmd: BackupCmd) -> Result<()> {
    match cmd {
        BackupCmd::Create { path } => {
            let written = hosts.backup(path.as_deref())?;
            println!("{}", written.display());
            Ok(())
        }
        BackupCmd::List => {
            for b in hosts.list_backups()? {
                let modified: chrono::DateTime<chrono::Local> = b.modified.into();
                println!("{}\t{}", modified.to_rfc3339(), b.path.display());
            }
            Ok(())
        }
    }
}

fn cmd_validate(cmd: ValidateCmd) -> Result<()> {
    match cmd {
        ValidateCmd::Address { value } => {
            if !crate::validate::validate_address(&value) {
                anyhow::bail!("invalid IP address: {value}");
            }
        }
        ValidateCmd::Domain { value } => {
            if !crate::validate::validate_domain(&value) {
                anyhow::bail!("invalid domain name: {value}");
            }
        }
    }
    println!("valid");
    Ok(())
}

fn cmd_config(paths: &HostmanPaths, hosts_file: Option<PathBuf>, cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Show => {
            let settings = HostsSettings::resolve(paths, hosts_file)?;
            println!("config:\t{}", paths.config_file.display());
            println!("hosts:\t{}", settings.hosts_file.display());
            println!("backups:\t{}", settings.backup_dir.display());
            println!("retention:\t{}", settings.retention);
            Ok(())
        }
        ConfigCmd::Set { hosts, backup_dir } => {
            let mut config = Config::load(paths)?;
            if hosts.is_some() {
                config.hosts_file = hosts;
            }
            if backup_dir.is_some() {
                config.backup_dir = backup_dir;
            }
            config.save(paths)?;
            println!("Saved {}", paths.config_file.display());
            Ok(())
        }
    }
}

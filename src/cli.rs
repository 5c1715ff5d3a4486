//! Command-line front end over the permission evaluator.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::authz::{self, AuthzMode};
use crate::config::{self, AppConfig};
use crate::models::{Action, PermissionSet, Requirement, Resource};

#[derive(Parser, Debug)]
#[command(name = "pm-authz", author, version, about = "Evaluate project workspace permissions", long_about = None)]
pub struct Cli {
    /// JSON permission set (defaults to PERMISSIONS_FILE)
    #[arg(long, global = true)]
    pub permissions: Option<PathBuf>,
    /// Evaluate as if no permission set was loaded yet
    #[arg(long, global = true, conflicts_with = "permissions")]
    pub unloaded: bool,
    /// Enforcement mode for `enforce` (defaults to AUTHZ_MODE)
    #[arg(long, global = true)]
    pub mode: Option<AuthzMode>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a single resource/action pair
    Check { resource: Resource, action: Action },
    /// Allow if any `resource:action` requirement holds
    Any { requirements: Vec<Requirement> },
    /// Allow only if every `resource:action` requirement holds
    All { requirements: Vec<Requirement> },
    /// Apply the enforcement mode to a resource/action pair
    Enforce { resource: Resource, action: Action },
    /// Report whether the permission set is the super admin sentinel
    SuperAdmin,
    /// Print the effective decision for every resource and action
    Matrix,
    /// Print display names of all resources and actions
    Labels,
}

/// Run one command, writing its report to `out`.
///
/// Returns the decision: `true` maps to exit code 0, `false` to 1. Listing
/// commands (`matrix`, `labels`) always return `true`.
pub fn run<W: Write>(cli: Cli, app_config: &AppConfig, out: &mut W) -> anyhow::Result<bool> {
    let set = if cli.unloaded {
        None
    } else {
        let path = cli
            .permissions
            .or_else(|| app_config.permissions_file.clone())
            .context("no permission set given (use --permissions or PERMISSIONS_FILE)")?;
        let set = config::load_permission_set(&path)
            .with_context(|| format!("failed to load permission set from {}", path.display()))?;
        Some(set)
    };
    let set = set.as_ref();

    let allowed = match cli.command {
        Commands::Check { resource, action } => {
            report(out, authz::has_permission(set, resource, action))?
        }
        Commands::Any { requirements } => report(out, authz::has_any_permission(set, requirements))?,
        Commands::All { requirements } => report(out, authz::has_all_permissions(set, requirements))?,
        Commands::Enforce { resource, action } => {
            let mode = cli.mode.unwrap_or(app_config.authz_mode);
            authz::enforce(mode, set, resource, action)?;
            writeln!(out, "allow ({mode})")?;
            true
        }
        Commands::SuperAdmin => report(out, authz::is_super_admin(set))?,
        Commands::Matrix => {
            print_matrix(out, set)?;
            true
        }
        Commands::Labels => {
            print_labels(out)?;
            true
        }
    };

    Ok(allowed)
}

fn report<W: Write>(out: &mut W, allowed: bool) -> std::io::Result<bool> {
    writeln!(out, "{}", if allowed { "allow" } else { "deny" })?;
    Ok(allowed)
}

fn print_matrix<W: Write>(out: &mut W, set: Option<&PermissionSet>) -> std::io::Result<()> {
    write!(out, "{:<18}", "Resource")?;
    for action in Action::ALL {
        write!(out, " {:<8}", action.as_str())?;
    }
    writeln!(out)?;

    for resource in Resource::ALL {
        write!(out, "{:<18}", resource.as_str())?;
        for action in Action::ALL {
            let mark = if authz::has_permission(set, resource, action) { "yes" } else { "-" };
            write!(out, " {:<8}", mark)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn print_labels<W: Write>(out: &mut W) -> std::io::Result<()> {
    for resource in Resource::ALL {
        writeln!(out, "{:<18} {}", resource.as_str(), resource.label())?;
    }
    for action in Action::ALL {
        writeln!(out, "{:<18} {}", action.as_str(), action.label())?;
    }
    Ok(())
}

//! gatehouse-admin: edit and inspect a policy snapshot file.
//!
//! The server loads the same file at startup (`GATEHOUSE_POLICY_FILE`), which
//! is how the first administrator gets a role.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gatehouse_auth::{
    AuthorizationEngine, Decision, InMemoryIdentityStore, Permission, PermissionSet,
    PolicySnapshot, Role, RoleBinding,
};
use gatehouse_observability::LogFormat;

#[derive(Parser)]
#[command(name = "gatehouse-admin")]
#[command(about = "Manage role bindings and role permissions in a policy file")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Policy snapshot file
    #[arg(short, long, env = "GATEHOUSE_POLICY_FILE", default_value = "policy.json")]
    policy: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind a user to a role (replaces the user's current role)
    AssignRole {
        /// User identity (e.g. an email address)
        identity: String,

        /// Role name
        role: String,
    },

    /// Replace the permission set of a role
    DefineRole {
        /// Role name
        role: String,

        /// Permissions granted by the role (none = grants nothing)
        permissions: Vec<String>,
    },

    /// Print the policy file
    Show,

    /// Check whether a user holds a permission (exit code 1 when denied)
    Check {
        identity: String,
        permission: String,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    gatehouse_observability::tracing::init(LogFormat::Compact, level);

    let mut snapshot = read_snapshot(&cli.policy)?;

    match cli.command {
        Commands::AssignRole { identity, role } => {
            assign_role(&mut snapshot, identity.clone(), role.clone())?;
            write_snapshot(&cli.policy, &snapshot)?;
            println!("Assigned role '{role}' to user '{identity}'");
        }
        Commands::DefineRole { role, permissions } => {
            let count = define_role(&mut snapshot, role.clone(), permissions)?;
            write_snapshot(&cli.policy, &snapshot)?;
            println!("Defined role '{role}' with {count} permission(s)");
        }
        Commands::Show => {
            println!("{}", snapshot.to_json_pretty()?);
        }
        Commands::Check {
            identity,
            permission,
        } => {
            let decision = check(&snapshot, &identity, permission);
            println!("{}", serde_json::to_string(&decision)?);
            if !decision.is_allowed() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn assign_role(snapshot: &mut PolicySnapshot, identity: String, role: String) -> Result<()> {
    anyhow::ensure!(!identity.is_empty(), "identity must not be empty");
    anyhow::ensure!(!role.trim().is_empty(), "role must not be empty");
    snapshot.assign_role(RoleBinding::new(identity, Role::new(role)));
    Ok(())
}

fn define_role(
    snapshot: &mut PolicySnapshot,
    role: String,
    permissions: Vec<String>,
) -> Result<usize> {
    anyhow::ensure!(!role.trim().is_empty(), "role must not be empty");
    let permissions = PermissionSet::try_from_names(permissions)?;
    let count = permissions.len();
    snapshot.define_role_permissions(Role::new(role), permissions);
    Ok(count)
}

/// Run the same decision the server would make against this snapshot.
fn check(snapshot: &PolicySnapshot, identity: &str, permission: String) -> Decision {
    let store = Arc::new(InMemoryIdentityStore::new());
    snapshot.apply_to(store.as_ref());
    AuthorizationEngine::new(store).authorize(identity, &Permission::new(permission))
}

/// Load the snapshot, or start empty when the file does not exist yet.
fn read_snapshot(path: &Path) -> Result<PolicySnapshot> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "policy file missing; starting empty");
        return Ok(PolicySnapshot::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read policy file: {}", path.display()))?;
    PolicySnapshot::from_json_str(&raw)
        .with_context(|| format!("parse policy file: {}", path.display()))
}

/// Replace the policy file atomically: write a sibling file, then rename it
/// over the target, so a crash never leaves a truncated policy behind.
fn write_snapshot(path: &Path, snapshot: &PolicySnapshot) -> Result<()> {
    let mut body = snapshot.to_json_pretty()?;
    body.push('\n');

    let staging = staging_path(path)?;
    fs::write(&staging, body)
        .with_context(|| format!("write policy file: {}", staging.display()))?;
    if let Err(err) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(err).with_context(|| format!("replace policy file: {}", path.display()));
    }
    tracing::debug!(path = %path.display(), "policy file written");
    Ok(())
}

/// Hidden file next to `path`; same directory keeps the rename on one filesystem.
fn staging_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .with_context(|| format!("policy path has no file name: {}", path.display()))?;
    let mut staged = std::ffi::OsString::from(".");
    staged.push(name);
    staged.push(".tmp");
    Ok(path.with_file_name(staged))
}

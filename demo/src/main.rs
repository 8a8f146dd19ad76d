//! bastion ACL demo CLI
//!
//! Loads an ACL configuration file and answers access queries against it.
//!
//! Usage:
//!   cargo run -p demo -- check --config demo/policies/acl.toml user test index
//!   cargo run -p demo -- check --config demo/policies/acl.toml auditor reports purge --explain
//!   cargo run -p demo -- list --config demo/policies/acl.toml
//!   cargo run -p demo -- scenario

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bastion_audit::InMemoryDecisionLog;
use bastion_contracts::{
    decision::AccessQuery,
    error::AclResult,
};
use bastion_core::{Acl, Gatekeeper};
use bastion_policy::ConfigBuilder;

/// Built-in policy for the `scenario` subcommand.
const SAMPLE_POLICY: &str = include_str!("../policies/acl.toml");

// ── CLI definition ────────────────────────────────────────────────────────────

/// bastion: role-based access control lists from a config file.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "bastion ACL demo",
    long_about = "Loads a TOML or JSON ACL configuration and answers\n\
                  \"may ROLE perform ACTION on RESOURCE?\" queries."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a single access query.
    Check {
        /// ACL configuration file (.toml or .json).
        #[arg(long, short)]
        config: PathBuf,
        role: String,
        resource: String,
        action: String,
        /// Also print which rule, or the default action, decided.
        #[arg(long)]
        explain: bool,
    },
    /// Print the roles, resources, and rules of a configuration.
    List {
        #[arg(long, short)]
        config: PathBuf,
    },
    /// Run the built-in guest/user scenario through an audited gatekeeper.
    Scenario,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to see every rule lookup.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check {
            config,
            role,
            resource,
            action,
            explain,
        } => run_check(&config, AccessQuery::new(role, resource, action), explain),
        Command::List { config } => run_list(&config),
        Command::Scenario => run_scenario(),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_check(config: &Path, query: AccessQuery, explain: bool) -> AclResult<()> {
    let acl = ConfigBuilder::from_file(config)?;
    let decision = acl.decide(&query.role, &query.resource, &query.action)?;

    if explain {
        println!("{}: {}", query, decision);
    } else if decision.is_allowed() {
        println!("allowed");
    } else {
        println!("denied");
    }
    Ok(())
}

fn run_list(config: &Path) -> AclResult<()> {
    let acl = ConfigBuilder::from_file(config)?;
    print_acl(&acl);
    Ok(())
}

/// (role, resource, action, expected allow) for the sample policy.
const SCENARIO_EXPECTATIONS: [(&str, &str, &str, bool); 6] = [
    ("guest", "index", "index", true),
    ("guest", "test", "index", false),
    ("user", "index", "index", true),
    ("user", "test", "index", true),
    ("auditor", "reports", "export", true),
    ("auditor", "reports", "purge", false),
];

fn run_scenario() -> AclResult<()> {
    let acl = ConfigBuilder::from_toml_str(SAMPLE_POLICY)?;
    print_acl(&acl);

    let log = InMemoryDecisionLog::new("scenario");
    let gate = Gatekeeper::new(Box::new(acl), Box::new(log.clone()));

    println!("Decisions");
    let mismatches = run_expectations(&gate, &SCENARIO_EXPECTATIONS)?;
    if !mismatches.is_empty() {
        eprintln!(
            "Scenario failed: {} decision(s) did not match the sample policy",
            mismatches.len()
        );
        std::process::exit(1);
    }

    let exported = log.export_log()?;
    println!();
    println!(
        "Audit chain: {} events, intact = {}, terminal hash = {}",
        exported.events.len(),
        log.verify_integrity(),
        exported.terminal_hash
    );
    info!(events = exported.events.len(), "scenario finished");
    Ok(())
}

/// Run each expectation through `gate`, printing one line per decision.
/// Returns the queries whose decision disagreed with the expectation.
fn run_expectations(
    gate: &Gatekeeper,
    expectations: &[(&str, &str, &str, bool)],
) -> AclResult<Vec<AccessQuery>> {
    let mut mismatches = Vec::new();
    for &(role, resource, action, expected) in expectations {
        let query = AccessQuery::new(role, resource, action);
        let decision = gate.check(&query)?;
        let marker = if decision.is_allowed() == expected { "ok" } else { "UNEXPECTED" };
        println!("  [{:>10}] {}: {}", marker, query, decision);

        if decision.is_allowed() != expected {
            mismatches.push(query);
        }
    }
    Ok(mismatches)
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_acl(acl: &Acl) {
    println!("Default action: {}", acl.default_action());
    println!();

    println!("Resources");
    for resource in acl.resources() {
        let actions = if resource.is_unrestricted() {
            "(any action)".to_string()
        } else {
            resource.actions.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        println!("  {:<12} {}", resource.name, actions);
    }
    println!();

    println!("Roles");
    for role in acl.roles() {
        match &role.parent {
            Some(parent) => println!("  {:<12} inherits {}", role.name, parent),
            None => println!("  {}", role.name),
        }
    }
    println!();

    println!("Rules");
    for (index, rule) in acl.rules().iter().enumerate() {
        println!("  #{:<3} {}", index, rule);
    }
    println!();
}

//! `loanpkg contracts` - list the contracts the registry dispatches.

use clap::Args;
use loanpkg_core::ContractRegistry;

/// Arguments for `loanpkg contracts`.
#[derive(Debug, Args)]
pub struct ContractsArgs {
    /// Print the names as a JSON array.
    #[arg(long)]
    pub json: bool,
}

/// Prints every registered contract name.
pub fn run_contracts(args: &ContractsArgs) {
    let registry = ContractRegistry::with_defaults();
    let names: Vec<&str> = registry.names().collect();
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&names).unwrap_or_else(|_| "[]".to_string())
        );
    } else {
        for name in names {
            println!("{name}");
        }
    }
}

//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use quay::util::ColorChoice;

/// quay - vendor third-party packages into a project's `internal` folder
#[derive(Parser)]
#[command(name = "quay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty vendor manifest in `internal/vendor.json`
    Init(InitArgs),

    /// List the packages the project defines and imports
    List(ListArgs),

    /// Copy an external package into the project and rewrite its imports
    Add(AddArgs),

    /// Update a vendored package (not implemented yet)
    Update(UpdateArgs),

    /// Remove a vendored package (not implemented yet)
    Remove(RemoveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Project directory (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Print the list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Import path of the package to vendor
    pub import_path: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Import path of the vendored package
    pub import_path: String,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Import path of the vendored package
    pub import_path: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

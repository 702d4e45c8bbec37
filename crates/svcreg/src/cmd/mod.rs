use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use svcreg_idl::{Loader, LoaderConfig};
use svcreg_registry::Registry;

use crate::exit::{load_error, CliResult};
use crate::output::OutputFormat;

pub mod check;
pub mod list;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load definitions, seal the registry and report counts.
    Check(CheckArgs),
    /// List every registered operation.
    List(ListArgs),
    /// Validate a payload against an operation's input or output schema.
    Validate(ValidateArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Check(args) => check::run(args, format),
        Command::List(args) => list::run(args, format),
        Command::Validate(args) => validate::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DefinitionArgs {
    /// Definition files or directories of `*.services.json` files.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
    /// Maximum number of documents read from one directory.
    #[arg(long, value_name = "N", default_value_t = LoaderConfig::default().max_documents_from_directory)]
    pub max_documents: usize,
    /// Maximum size of one definition document in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = LoaderConfig::default().max_document_size)]
    pub max_document_size: usize,
}

impl DefinitionArgs {
    fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            max_documents_from_directory: self.max_documents,
            max_document_size: self.max_document_size,
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub definitions: DefinitionArgs,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub definitions: DefinitionArgs,
    /// Only list operations of this service.
    #[arg(long, value_name = "SERVICE")]
    pub service: Option<String>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub definitions: DefinitionArgs,
    /// Service name as seen on the wire.
    #[arg(long, short = 's')]
    pub service: String,
    /// Operation wire name.
    #[arg(long, short = 'o')]
    pub operation: String,
    /// JSON payload.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
    /// Check against the output schema instead of the input schema.
    #[arg(long)]
    pub output: bool,
    /// Reject fields the schema does not declare.
    #[arg(long)]
    pub strict: bool,
    /// Omit fields equal to their defaults from the normalized payload.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub struct LoadedRegistry {
    pub registry: Arc<Registry>,
    pub documents: usize,
}

/// Load every definition path and seal the result.
pub fn load_registry(args: &DefinitionArgs) -> CliResult<LoadedRegistry> {
    let mut loader = Loader::with_config(args.loader_config())
        .map_err(|err| load_error("loader init failed", err))?;

    let mut documents = 0;
    for path in &args.paths {
        documents += loader
            .add_path(path)
            .map_err(|err| load_error("load failed", err))?;
    }

    let registry = loader
        .build()
        .map_err(|err| load_error("load failed", err))?
        .into_shared();
    tracing::info!(
        documents,
        services = registry.len(),
        operations = registry.operation_count(),
        "registry sealed"
    );

    Ok(LoadedRegistry {
        registry,
        documents,
    })
}

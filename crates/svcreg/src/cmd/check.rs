use serde::Serialize;

use crate::cmd::{load_registry, CheckArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, table, OutputFormat};

#[derive(Serialize)]
struct CheckOutput {
    schema_id: &'static str,
    documents: usize,
    services: usize,
    operations: usize,
    sealed: bool,
}

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let loaded = load_registry(&args.definitions)?;
    let out = CheckOutput {
        schema_id: "https://schemas.3leaps.dev/svcreg/cli/v1/registry-check.schema.json",
        documents: loaded.documents,
        services: loaded.registry.len(),
        operations: loaded.registry.operation_count(),
        sealed: loaded.registry.is_sealed(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut t = table(["DOCUMENTS", "SERVICES", "OPERATIONS", "SEALED"]);
            t.add_row(vec![
                out.documents.to_string(),
                out.services.to_string(),
                out.operations.to_string(),
                out.sealed.to_string(),
            ]);
            println!("{t}");
        }
        OutputFormat::Pretty => {
            println!(
                "ok: {} documents, {} services, {} operations",
                out.documents, out.services, out.operations
            );
        }
    }

    Ok(SUCCESS)
}

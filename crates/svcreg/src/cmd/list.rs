use serde::Serialize;
use svcreg_registry::{Registry, ResolveError, ServiceDescriptor};

use crate::cmd::{load_registry, ListArgs};
use crate::exit::{resolve_error, CliResult, SUCCESS};
use crate::output::{print_json, schema_label, table, OutputFormat};

#[derive(Serialize)]
struct OperationRow {
    service: String,
    operation: String,
    wire_name: String,
    shape: &'static str,
    input: String,
    output: String,
}

#[derive(Serialize)]
struct ListOutput {
    schema_id: &'static str,
    operations: Vec<OperationRow>,
}

pub fn run(args: ListArgs, format: OutputFormat) -> CliResult<i32> {
    let loaded = load_registry(&args.definitions)?;
    let services = select_services(&loaded.registry, args.service.as_deref())?;

    let operations: Vec<OperationRow> = services
        .into_iter()
        .flat_map(|service| {
            service.operations().map(move |op| OperationRow {
                service: service.name().to_string(),
                operation: op.code_name().to_string(),
                wire_name: op.wire_name().to_string(),
                shape: op.shape().as_str(),
                input: schema_label(op.input_schema()),
                output: schema_label(op.output_schema()),
            })
        })
        .collect();

    let out = ListOutput {
        schema_id: "https://schemas.3leaps.dev/svcreg/cli/v1/operation-list.schema.json",
        operations,
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut t = table(["SERVICE", "OPERATION", "WIRE NAME", "SHAPE", "INPUT", "OUTPUT"]);
            for row in &out.operations {
                t.add_row(vec![
                    row.service.as_str(),
                    row.operation.as_str(),
                    row.wire_name.as_str(),
                    row.shape,
                    row.input.as_str(),
                    row.output.as_str(),
                ]);
            }
            println!("{t}");
        }
        OutputFormat::Pretty => {
            for row in &out.operations {
                println!(
                    "{}.{} \"{}\" {} ({} -> {})",
                    row.service, row.operation, row.wire_name, row.shape, row.input, row.output
                );
            }
        }
    }

    Ok(SUCCESS)
}

fn select_services<'a>(
    registry: &'a Registry,
    filter: Option<&str>,
) -> CliResult<Vec<&'a ServiceDescriptor>> {
    match filter {
        Some(name) => registry
            .service(name)
            .map(|service| vec![service])
            .ok_or_else(|| resolve_error(ResolveError::UnknownService(name.to_string()))),
        None => Ok(registry.services().collect()),
    }
}

use serde::Serialize;
use serde_json::Value as JsonValue;
use svcreg_schema::{SchemaError, ValidatorConfig};

use crate::cmd::{load_registry, ValidateArgs};
use crate::exit::{
    io_error, resolve_error, schema_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE,
};
use crate::output::{print_json, table, OutputFormat};

#[derive(Serialize)]
struct FieldErrorRow {
    field: String,
    reason: String,
}

#[derive(Serialize)]
struct ValidateOutput {
    schema_id: &'static str,
    service: String,
    operation: String,
    direction: &'static str,
    schema: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<JsonValue>,
    errors: Vec<FieldErrorRow>,
}

pub fn run(args: ValidateArgs, format: OutputFormat) -> CliResult<i32> {
    let loaded = load_registry(&args.definitions)?;
    let op = loaded
        .registry
        .resolve(&args.service, &args.operation)
        .map_err(resolve_error)?;

    let (direction, schema) = if args.output {
        ("output", op.output_schema())
    } else {
        ("input", op.input_schema())
    };
    let Some(schema) = schema else {
        return Err(CliError::new(
            USAGE,
            format!(
                "operation {} of service {} has no {direction} schema",
                op.wire_name(),
                args.service
            ),
        ));
    };

    let payload = read_payload(&args)?;
    let validator = schema.validator(ValidatorConfig {
        strict_mode: args.strict,
        compact_encoding: args.compact,
    });

    let mut out = ValidateOutput {
        schema_id: "https://schemas.3leaps.dev/svcreg/cli/v1/validation-result.schema.json",
        service: args.service.clone(),
        operation: op.wire_name().to_string(),
        direction,
        schema: schema.name().to_string(),
        valid: true,
        payload: None,
        errors: Vec::new(),
    };

    match validator.validate(&payload) {
        Ok(instance) => {
            let normalized = validator
                .serialize(&instance)
                .map_err(|err| schema_error("serialize failed", err))?;
            out.payload = Some(normalized);
        }
        Err(SchemaError::Validation { errors, .. }) => {
            out.valid = false;
            out.errors = errors
                .into_iter()
                .map(|err| FieldErrorRow {
                    field: err.field,
                    reason: err.reason,
                })
                .collect();
        }
        Err(other) => return Err(schema_error("validate failed", other)),
    }

    print_result(&out, format);
    Ok(if out.valid { SUCCESS } else { DATA_INVALID })
}

fn read_payload(args: &ValidateArgs) -> CliResult<JsonValue> {
    let text = match (&args.json, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?,
        (None, None) => return Err(CliError::new(USAGE, "one of --json or --file is required")),
    };

    serde_json::from_str(&text)
        .map_err(|err| CliError::new(DATA_INVALID, format!("payload is not valid JSON: {err}")))
}

fn print_result(out: &ValidateOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            if let Some(payload) = &out.payload {
                println!(
                    "{}",
                    serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string())
                );
                return;
            }
            let mut t = table(["FIELD", "REASON"]);
            for err in &out.errors {
                t.add_row(vec![err.field.as_str(), err.reason.as_str()]);
            }
            println!("{t}");
        }
        OutputFormat::Pretty => match &out.payload {
            Some(payload) => println!("valid {} {}: {payload}", out.direction, out.schema),
            None => {
                println!("invalid {} {}:", out.direction, out.schema);
                for err in &out.errors {
                    println!("  {}: {}", err.field, err.reason);
                }
            }
        },
    }
}

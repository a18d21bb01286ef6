use cta_composer::CtaError;
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cta-validate <config.json> [more.json ...]");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  cta-validate widget.json");
        eprintln!("  cta-validate configs/*.json");
        process::exit(1);
    }

    let mut exit_code = 0;

    for file_path in &args[1..] {
        match validate_file(file_path) {
            Ok(()) => {
                println!("✓ {} is valid", file_path);
            }
            Err(e) => {
                eprintln!("✗ {} has errors:", file_path);
                print_error(&e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn validate_file(path: &str) -> Result<(), CtaError> {
    let content = fs::read_to_string(path)
        .map_err(|e| CtaError::ValidationError(format!("Failed to read file: {}", e)))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| CtaError::MalformedJson(e.to_string()))?;
    // Stored configs may predate the dense-order invariant
    cta_composer::load(&value)?;
    Ok(())
}

fn print_error(error: &CtaError) {
    match error {
        CtaError::MalformedJson(msg) => {
            eprintln!("  Malformed JSON:");
            eprintln!("    {}", msg);
        }
        CtaError::Deserialization(msg) => {
            eprintln!("  Deserialization error:");
            eprintln!("    {}", msg);
        }
        CtaError::DuplicateId { id } => {
            eprintln!("  Duplicate component id '{}'", id);
            eprintln!("    Component ids must be unique within the document");
        }
        CtaError::OrderInvariant {
            position,
            expected,
            found,
        } => {
            eprintln!("  Order invariant violated at position {}:", position);
            eprintln!("    Expected {}, found {}", expected, found);
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}

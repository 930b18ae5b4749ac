use anyhow::{Context, Result};
use rules_core::Ruleset;
use rules_parser::parse_file;
use rules_validator::RuleEvaluator;
use serde_json::json;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(ruleset_path: &str, format: &str) -> Result<()> {
    info!("Checking ruleset: {}", ruleset_path);

    let path = Path::new(ruleset_path);
    let ruleset = parse_file(path)
        .with_context(|| format!("Failed to parse ruleset file: {}", ruleset_path))?;

    let evaluator = RuleEvaluator::new();
    let errors = evaluator.check_definition(&ruleset);

    if format == "json" {
        output::print_json(&json!({
            "name": ruleset.name,
            "version": ruleset.version,
            "valid": errors.is_empty(),
            "errors": errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            "fields": ruleset.fields.iter().map(|f| json!({
                "name": f.name,
                "required": f.is_required(),
                "constraints": f.constraints.iter().map(|c| c.kind.to_string()).collect::<Vec<_>>(),
            })).collect::<Vec<_>>(),
        }));
    } else {
        print_summary(&ruleset);

        if errors.is_empty() {
            output::print_success("Ruleset definition is valid");
        } else {
            for error in &errors {
                output::print_error(&error.to_string());
            }
        }
    }

    if !errors.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_summary(ruleset: &Ruleset) {
    output::print_info(&format!(
        "Ruleset loaded: {} v{}",
        ruleset.name, ruleset.version
    ));

    println!("\nRuleset Summary:");
    println!("  Name:        {}", ruleset.name);
    println!("  Version:     {}", ruleset.version);
    println!(
        "  Description: {}",
        ruleset.description.as_deref().unwrap_or("N/A")
    );
    println!("  Fields:      {}", ruleset.fields.len());
    println!("  Constraints: {}", ruleset.constraint_count());

    println!("\nFields:");
    for field in &ruleset.fields {
        let kinds: Vec<String> = field.constraints.iter().map(|c| c.kind.to_string()).collect();
        println!("  {:<20} {}", field.name, kinds.join(", "));
    }

    let custom = ruleset.custom_predicates();
    if !custom.is_empty() {
        println!("\nCustom Predicates: {}", custom.join(", "));
    }
    println!();
}

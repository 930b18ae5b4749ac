use colored::*;
use rules_core::ValidationReport;
use serde_json::json;

pub fn print_validation_report(report: &ValidationReport, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(report),
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.violations.is_empty() {
        println!("\n{}", "Violations:".red().bold());
        for (i, violation) in report.violations.iter().enumerate() {
            println!(
                "  {}. {} {}",
                i + 1,
                format!("[{} / {}]", violation.field, violation.constraint).dimmed(),
                violation.message.red()
            );
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Fields checked:        {}", report.stats.fields_checked);
    println!("  Fields skipped:        {}", report.stats.fields_skipped);
    println!(
        "  Constraints evaluated: {}",
        report.stats.constraints_evaluated
    );
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) {
    let output = json!({
        "passed": report.passed,
        "message": report.message(),
        "violations": report.violations.iter().map(|v| json!({
            "field": v.field,
            "constraint": v.constraint,
            "message": v.message,
        })).collect::<Vec<_>>(),
        "summary": {
            "fields_checked": report.stats.fields_checked,
            "fields_skipped": report.stats.fields_skipped,
            "constraints_evaluated": report.stats.constraints_evaluated,
        }
    });

    print_json(&output);
}

pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => print_error(&format!("Failed to render JSON: {}", e)),
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "!".yellow().bold(), message.yellow());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

use anyhow::Result;
use rules_validator::RuleEvaluator;

const BUILT_INS: [(&str, &str); 5] = [
    ("required", "value must not be empty or zero"),
    ("present", "timestamp within the tolerance of now"),
    ("past", "timestamp no later than now plus the tolerance"),
    ("future", "timestamp no earlier than now minus the tolerance"),
    ("range(min|max)", "number within the inclusive bounds"),
];

pub fn execute() -> Result<()> {
    let evaluator = RuleEvaluator::new();

    println!("Built-in constraints:");
    for (name, summary) in BUILT_INS {
        println!("  {:<16} {}", name, summary);
    }

    println!("\nRegistered predicates:");
    for name in evaluator.registry().names() {
        println!("  {}", name);
    }

    Ok(())
}

use crate::cmd::input::InputArgs;
use crate::output::{print_heading, print_json};
use venture_core::risk::{analyze_risk, RiskAnalysis};

pub fn run(input: &InputArgs, json: bool) -> anyhow::Result<()> {
    let resolved = input.resolve()?;
    let analysis = analyze_risk(&resolved.metrics, resolved.stage);

    if json {
        return print_json(&analysis);
    }

    print_analysis(&analysis);
    Ok(())
}

pub fn print_analysis(analysis: &RiskAnalysis) {
    print_heading("Risk Profile");
    println!("Overall risk: {}", analysis.overall_risk);

    if !analysis.primary_drivers.is_empty() {
        println!();
        println!("Primary risk drivers:");
        for d in &analysis.primary_drivers {
            println!("  - {}", d.label);
        }
    }

    if !analysis.critical_weaknesses.is_empty() {
        println!();
        println!("Critical weaknesses:");
        for w in &analysis.critical_weaknesses {
            println!("  - {}", w.title);
            println!("    {}", w.description);
        }
    }

    if !analysis.structural_constraints.is_empty() {
        println!();
        println!("Structural constraints:");
        for c in &analysis.structural_constraints {
            println!("  - {}: {}", c.label, c.description);
        }
    }
}

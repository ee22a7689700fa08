use crate::cmd::input::InputArgs;
use crate::output::{print_heading, print_json};
use venture_core::assessment::{assess, RoadmapOutcome, BLOCKED_DETAIL, BLOCKED_HEADLINE};
use venture_core::roadmap::ActivatedPhase;

/// Prints the roadmap, or the blocked notice when the idea is Not Ready.
/// A blocked roadmap is a normal result, not an error.
pub fn run(input: &InputArgs, json: bool) -> anyhow::Result<()> {
    let resolved = input.resolve()?;
    let assessment = assess(&resolved.metrics, resolved.stage);

    if json {
        return print_json(&assessment.roadmap);
    }

    print_outcome(&assessment.roadmap);
    Ok(())
}

pub fn print_outcome(outcome: &RoadmapOutcome) {
    print_heading("Structured Action Roadmap");
    match outcome {
        RoadmapOutcome::Blocked { gate_violations, .. } => {
            println!("{BLOCKED_HEADLINE}");
            println!("{BLOCKED_DETAIL}");
            for v in gate_violations {
                println!("  - {v}");
            }
        }
        RoadmapOutcome::Directional { notice, phases, .. } => {
            println!("Conditional analytical maturity: {notice}");
            println!();
            print_phases(phases);
        }
        RoadmapOutcome::Committed { phases } => print_phases(phases),
    }
}

fn print_phases(phases: &[ActivatedPhase]) {
    println!("{} phases activated", phases.len());
    for a in phases {
        let p = a.phase;
        println!();
        println!("{}. {} [{}] ({})", a.sequence, p.name, p.kind, p.duration);
        println!("   Why:       {}", a.activation_reason);
        println!("   Objective: {}", p.objective);
        for action in p.actions {
            println!("   - {action}");
        }
        println!("   Success:   {}", p.success_criteria);
        println!("   Mitigates: {}", p.risk_mitigated);
    }
}

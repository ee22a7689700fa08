use crate::cmd::input::InputArgs;
use crate::output::{print_heading, print_json, print_table};
use venture_core::metrics::fmt_score;
use venture_core::readiness::{compute_readiness, ReadinessResult};

pub fn run(input: &InputArgs, json: bool) -> anyhow::Result<()> {
    let resolved = input.resolve()?;
    let result = compute_readiness(&resolved.metrics);

    if json {
        return print_json(&result);
    }

    print_result(&result);
    Ok(())
}

pub fn print_result(result: &ReadinessResult) {
    print_heading("Execution Readiness");
    println!("Readiness index: {}/100", fmt_score(result.index));
    println!("Tier:            {}", result.tier);

    if !result.gate_violations.is_empty() {
        println!();
        println!("Gate violations:");
        for v in &result.gate_violations {
            println!("  - {v}");
        }
    }

    println!();
    let rows = result
        .metric_breakdown
        .iter()
        .map(|r| {
            vec![
                r.label.clone(),
                fmt_score(r.value),
                format!("{}%", r.weight),
                fmt_score(r.contribution),
                if r.meets_minimum { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    print_table(&["METRIC", "VALUE", "WEIGHT", "CONTRIBUTION", "MIN"], rows);

    if let Some(signal) = &result.improvement_signal {
        println!();
        println!(
            "Improvement signal: {} (currently {}) adds {} index points per point; {} points to the next tier.",
            signal.label,
            fmt_score(signal.current_value),
            fmt_score(signal.index_gain_per_point),
            fmt_score(signal.points_to_next_tier),
        );
    }
}

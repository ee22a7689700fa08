use crate::output::{print_json, print_table};
use serde::Serialize;
use venture_core::metrics::Stage;
use venture_core::phases::{
    effective_priority, lookup, stage_modifier, RoadmapPhase, PHASE_LIBRARY,
};

#[derive(Serialize)]
struct PhaseRow {
    #[serde(flatten)]
    phase: &'static RoadmapPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage_modifier: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    effective_priority: Option<i32>,
}

fn row(phase: &'static RoadmapPhase, stage: Option<Stage>) -> PhaseRow {
    PhaseRow {
        phase,
        stage_modifier: stage.map(|s| stage_modifier(s, phase.id)),
        effective_priority: stage.map(|s| effective_priority(s, phase)),
    }
}

pub fn run(id: Option<&str>, stage: Option<Stage>, json: bool) -> anyhow::Result<()> {
    if let Some(id) = id {
        return show(id, stage, json);
    }

    let rows: Vec<PhaseRow> = PHASE_LIBRARY.iter().map(|p| row(p, stage)).collect();

    if json {
        return print_json(&rows);
    }

    match stage {
        None => {
            let table = rows
                .iter()
                .map(|r| {
                    vec![
                        r.phase.base_priority.to_string(),
                        r.phase.id.to_string(),
                        r.phase.name.to_string(),
                        r.phase.kind.to_string(),
                        r.phase.duration.to_string(),
                    ]
                })
                .collect();
            print_table(&["PRIORITY", "ID", "NAME", "TYPE", "DURATION"], table);
        }
        Some(stage) => {
            println!("Stage: {stage}");
            println!();
            let table = rows
                .iter()
                .map(|r| {
                    vec![
                        r.phase.base_priority.to_string(),
                        format!("{:+}", r.stage_modifier.unwrap_or(0)),
                        r.effective_priority.unwrap_or(r.phase.base_priority).to_string(),
                        r.phase.id.to_string(),
                        r.phase.name.to_string(),
                    ]
                })
                .collect();
            print_table(&["BASE", "MODIFIER", "EFFECTIVE", "ID", "NAME"], table);
        }
    }
    Ok(())
}

fn show(id: &str, stage: Option<Stage>, json: bool) -> anyhow::Result<()> {
    let r = row(lookup(id)?, stage);

    if json {
        return print_json(&r);
    }

    let p = r.phase;
    println!("{} ({})", p.name, p.id);
    println!("Type:      {}", p.kind);
    println!("Priority:  {}", p.base_priority);
    if let (Some(stage), Some(modifier), Some(effective)) =
        (stage, r.stage_modifier, r.effective_priority)
    {
        println!("{stage}: {modifier:+} -> {effective}");
    }
    println!("Duration:  {}", p.duration);
    println!("Objective: {}", p.objective);
    println!("Actions:");
    for action in p.actions {
        println!("  - {action}");
    }
    println!("Success:   {}", p.success_criteria);
    println!("Mitigates: {}", p.risk_mitigated);
    Ok(())
}

use crate::cmd::input::InputArgs;
use crate::output::print_json;
use venture_core::assessment::assess;

pub fn run(input: &InputArgs, json: bool) -> anyhow::Result<()> {
    let resolved = input.resolve()?;
    let assessment = assess(&resolved.metrics, resolved.stage);

    if json {
        let value = serde_json::json!({
            "title": resolved.title,
            "assessment": assessment,
        });
        return print_json(&value);
    }

    if let Some(title) = &resolved.title {
        println!("{title}");
    }
    println!("Stage: {}", assessment.stage);
    println!();
    crate::cmd::risk::print_analysis(&assessment.risk);
    println!();
    crate::cmd::readiness::print_result(&assessment.readiness);
    println!();
    crate::cmd::roadmap::print_outcome(&assessment.roadmap);
    Ok(())
}

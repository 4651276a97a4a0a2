//! Given steps for task planner BDD scenarios.

use super::world::{PlannerWorld, ScenarioClock};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use task_planner::planner::{
    domain::{Section, Task},
    ports::KeyValueStore,
    services::FIRST_LAUNCH_KEY,
};

#[given(r#"a first launch on "{day}""#)]
fn a_first_launch(world: &mut PlannerWorld, day: String) -> Result<(), eyre::Report> {
    let clock = ScenarioClock::on(&day).wrap_err("build scenario clock")?;
    world.launch(clock);
    Ok(())
}

#[given(r#"a returning user on "{day}""#)]
fn a_returning_user(world: &mut PlannerWorld, day: String) -> Result<(), eyre::Report> {
    world
        .storage
        .set(FIRST_LAUNCH_KEY, "false".to_owned())
        .wrap_err("record previous launch")?;
    let clock = ScenarioClock::on(&day).wrap_err("build scenario clock")?;
    world.launch(clock);
    Ok(())
}

#[given(r#"anytime tasks "{first}" and "{second}""#)]
fn anytime_tasks(
    world: &mut PlannerWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let store = world.store()?;
    store.insert(Task::new(first), Section::Anytime, None, None);
    store.insert(Task::new(second), Section::Anytime, None, None);
    Ok(())
}

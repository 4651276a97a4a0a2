//! Then steps for task planner BDD scenarios.

use super::world::{PlannerWorld, date};
use eyre::eyre;
use rstest_bdd_macros::then;
use task_planner::planner::domain::Task;

#[then("the anytime list has {count:usize} entries")]
fn anytime_list_has(world: &PlannerWorld, count: usize) -> Result<(), eyre::Report> {
    let found = world.store()?.anytime().len();
    if found != count {
        return Err(eyre!("expected {count} anytime tasks, found {found}"));
    }
    Ok(())
}

#[then(r#""{day}" has {count:usize} open entries"#)]
fn day_has_open(world: &PlannerWorld, day: String, count: usize) -> Result<(), eyre::Report> {
    let found = world.store()?.tasks_for(&date(&day)?).len();
    if found != count {
        return Err(eyre!("expected {count} open tasks on {day}, found {found}"));
    }
    Ok(())
}

#[then(r#""{day}" has {count:usize} completed entries"#)]
fn day_has_completed(world: &PlannerWorld, day: String, count: usize) -> Result<(), eyre::Report> {
    let key = date(&day)?;
    let completed = world.store()?.completed_scheduled();
    let tasks = completed.get(&key).map(Vec::as_slice).unwrap_or_default();
    if tasks.len() != count {
        return Err(eyre!(
            "expected {count} completed tasks on {day}, found {}",
            tasks.len()
        ));
    }
    if let Some(open) = tasks.iter().find(|task| !task.is_completed()) {
        return Err(eyre!("completed list holds open task '{}'", open.title()));
    }
    Ok(())
}

#[then(r#"the first task on "{day}" is titled "{title}""#)]
fn first_task_titled(world: &PlannerWorld, day: String, title: String) -> Result<(), eyre::Report> {
    let key = date(&day)?;
    let tasks = world.store()?.tasks_for(&key);
    let first = tasks
        .first()
        .ok_or_else(|| eyre!("no open task on {day}"))?;
    if first.title() != title || first.date() != Some(&key) {
        return Err(eyre!(
            "expected '{title}' dated {day}, found '{}' dated {:?}",
            first.title(),
            first.date()
        ));
    }
    Ok(())
}

#[then(r#"the removed task is "{title}" without a date"#)]
fn removed_task_is(world: &PlannerWorld, title: String) -> Result<(), eyre::Report> {
    let removed = world
        .removed
        .as_ref()
        .ok_or_else(|| eyre!("no task has been removed"))?;
    if removed.title() != title {
        return Err(eyre!("expected '{title}', removed '{}'", removed.title()));
    }
    if removed.date().is_some() || removed.time().is_some() {
        return Err(eyre!("removed anytime task kept its schedule"));
    }
    Ok(())
}

#[then(r#"the anytime titles are "{first}" then "{second}""#)]
fn anytime_titles(world: &PlannerWorld, first: String, second: String) -> Result<(), eyre::Report> {
    let anytime = world.store()?.anytime();
    let titles: Vec<&str> = anytime.iter().map(Task::title).collect();
    if titles != [first.as_str(), second.as_str()] {
        return Err(eyre!("unexpected anytime order {titles:?}"));
    }
    Ok(())
}

#[then(r#"the completed view lists "{title}""#)]
fn completed_view_lists(world: &PlannerWorld, title: String) -> Result<(), eyre::Report> {
    let view = world.completed()?.view();
    if !view.entries().iter().any(|entry| entry.task.title() == title) {
        return Err(eyre!("'{title}' missing from the completed view"));
    }
    Ok(())
}

#[then("the completed view is empty")]
fn completed_view_empty(world: &PlannerWorld) -> Result<(), eyre::Report> {
    let view = world.completed()?.view();
    if !view.is_empty() {
        return Err(eyre!("completed view still lists {} tasks", view.len()));
    }
    Ok(())
}

//! When steps for task planner BDD scenarios.

use super::world::{PlannerWorld, date};
use eyre::eyre;
use rstest_bdd_macros::when;
use task_planner::planner::domain::{CompletionOrigin, Section, Task};

#[when(r#""{title}" is added to anytime with date "{day}""#)]
fn added_to_anytime_with_date(
    world: &mut PlannerWorld,
    title: String,
    day: String,
) -> Result<(), eyre::Report> {
    let task = Task::new(title).with_date(date(&day)?).with_time("9:00 AM");
    world.store()?.insert(task, Section::Anytime, None, None);
    Ok(())
}

#[when(r#""{title}" is added to anytime"#)]
fn added_to_anytime(world: &mut PlannerWorld, title: String) -> Result<(), eyre::Report> {
    world
        .store()?
        .insert(Task::new(title), Section::Anytime, None, None);
    Ok(())
}

#[when(r#""{title}" is scheduled on "{day}" at row {row:usize}"#)]
fn scheduled_on(
    world: &mut PlannerWorld,
    title: String,
    day: String,
    row: usize,
) -> Result<(), eyre::Report> {
    let store = world.store()?;
    let key = date(&day)?;
    store.insert(Task::new(title), Section::Scheduled, Some(row), Some(key.clone()));
    store.set_selected_date(key);
    Ok(())
}

#[when("anytime row {row:usize} is removed")]
fn anytime_row_removed(world: &mut PlannerWorld, row: usize) -> Result<(), eyre::Report> {
    let removed = world
        .store()?
        .remove(Section::Anytime, row, None)
        .ok_or_else(|| eyre!("anytime row {row} does not exist"))?;
    world.removed = Some(removed);
    Ok(())
}

#[when("the removed task is reinserted into anytime at row {row:usize}")]
fn removed_task_reinserted(world: &mut PlannerWorld, row: usize) -> Result<(), eyre::Report> {
    let task = world
        .removed
        .take()
        .ok_or_else(|| eyre!("no task has been removed"))?;
    world.store()?.insert(task, Section::Anytime, Some(row), None);
    Ok(())
}

#[when("the scheduled task at row {row:usize} is toggled")]
fn scheduled_task_toggled(world: &mut PlannerWorld, row: usize) -> Result<(), eyre::Report> {
    world
        .store()?
        .change_complete(CompletionOrigin::AllTasks, row)
        .ok_or_else(|| eyre!("scheduled row {row} does not exist"))?;
    Ok(())
}

#[when("the anytime task at row {row:usize} is toggled")]
fn anytime_task_toggled(world: &mut PlannerWorld, row: usize) -> Result<(), eyre::Report> {
    world
        .store()?
        .change_complete(CompletionOrigin::Completed, row)
        .ok_or_else(|| eyre!("anytime row {row} does not exist"))?;
    Ok(())
}

#[when(r#"the completed task "{title}" is toggled back"#)]
fn completed_task_toggled_back(world: &mut PlannerWorld, title: String) -> Result<(), eyre::Report> {
    let entry = world
        .completed()?
        .view()
        .entries()
        .iter()
        .find(|entry| entry.task.title() == title)
        .cloned()
        .ok_or_else(|| eyre!("no completed task titled '{title}'"))?;
    let origin = CompletionOrigin::from(Section::of(&entry.task));
    let reopened = world
        .store()?
        .change_complete_by_id(origin, entry.task.id())
        .ok_or_else(|| eyre!("completed task '{title}' vanished"))?;
    if reopened {
        return Err(eyre!("task '{title}' was completed again instead of reopened"));
    }
    Ok(())
}

#[when("the planner restarts")]
fn planner_restarts(world: &mut PlannerWorld) -> Result<(), eyre::Report> {
    world.restart()
}

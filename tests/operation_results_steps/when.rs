//! When steps for operation result BDD scenarios.

use super::world::{LastOutcome, OperationResultsWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::{
    task::{domain::TaskId, services::CreateTaskRequest},
    user::{domain::UserId, services::UpdateUserRequest},
};

#[when(r#"a task with a blank title is added for "{name}""#)]
fn add_blank_task(world: &mut OperationResultsWorld, name: String) -> Result<(), eyre::Report> {
    let owner = world.registered_id(&name)?;
    let result = run_async(world.tasks.add(CreateTaskRequest::new("", owner)))
        .wrap_err("add task with blank title")?;
    world.last_outcome = Some(LastOutcome::Task(result));
    Ok(())
}

#[when(r#"a task titled "{title}" is added for an unknown user"#)]
fn add_task_for_unknown_user(
    world: &mut OperationResultsWorld,
    title: String,
) -> Result<(), eyre::Report> {
    let result = run_async(world.tasks.add(CreateTaskRequest::new(title, UserId::new())))
        .wrap_err("add task for unknown user")?;
    world.last_outcome = Some(LastOutcome::Task(result));
    Ok(())
}

#[when(r#""{name}" changes their email to "{email}""#)]
fn change_email(
    world: &mut OperationResultsWorld,
    name: String,
    email: String,
) -> Result<(), eyre::Report> {
    let id = world.registered_id(&name)?;
    let result = run_async(world.users.update(id, UpdateUserRequest::new(name, email)))
        .wrap_err("change user email")?;
    world.last_outcome = Some(LastOutcome::User(result));
    Ok(())
}

#[when(r#""{name}" is renamed to "{new_name}" keeping their email"#)]
fn rename_user(
    world: &mut OperationResultsWorld,
    name: String,
    new_name: String,
) -> Result<(), eyre::Report> {
    let id = world.registered_id(&name)?;
    let current = run_async(world.users.get_by_id(id))
        .wrap_err("load user before rename")?
        .into_result()
        .map_err(|errors| eyre::eyre!("user lookup failed: {}", errors.first()))?;
    let request = UpdateUserRequest::new(new_name, current.email().as_str());
    let result = run_async(world.users.update(id, request)).wrap_err("rename user")?;
    world.last_outcome = Some(LastOutcome::User(result));
    Ok(())
}

#[when("an unknown task is deleted")]
fn delete_unknown_task(world: &mut OperationResultsWorld) -> Result<(), eyre::Report> {
    let result =
        run_async(world.tasks.delete(TaskId::new())).wrap_err("delete unknown task")?;
    world.last_outcome = Some(LastOutcome::Deleted(result));
    Ok(())
}

#[when("all tasks are listed")]
fn list_all_tasks(world: &mut OperationResultsWorld) -> Result<(), eyre::Report> {
    let result = run_async(world.tasks.get_all(0, 0)).wrap_err("list tasks")?;
    world.last_outcome = Some(LastOutcome::Tasks(result));
    Ok(())
}

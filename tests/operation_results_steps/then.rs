//! Then steps for operation result BDD scenarios.

use super::world::{LastOutcome, OperationResultsWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;

fn last_outcome(world: &OperationResultsWorld) -> Result<&LastOutcome, eyre::Report> {
    world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation outcome in scenario world"))
}

#[then(r#"the operation fails with a single {status:u16} error keyed "{key}""#)]
fn fails_with_single_error(
    world: &OperationResultsWorld,
    status: u16,
    key: String,
) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    let errors = outcome
        .errors()
        .ok_or_else(|| eyre::eyre!("expected a failed envelope, got {outcome:?}"))?;

    eyre::ensure!(
        errors.count() == 1,
        "expected one error, found {}",
        errors.count()
    );
    let error = errors.first();
    eyre::ensure!(
        error.status().code() == status,
        "expected status {status}, found {}",
        error.status()
    );
    eyre::ensure!(
        error.key() == Some(key.as_str()),
        "expected key {key}, found {:?}",
        error.key()
    );
    Ok(())
}

#[then("the operation succeeds")]
fn operation_succeeds(world: &OperationResultsWorld) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    eyre::ensure!(
        outcome.errors().is_none(),
        "expected a successful envelope, got {outcome:?}"
    );
    Ok(())
}

#[then("the operation succeeds with an empty list")]
fn operation_succeeds_with_empty_list(world: &OperationResultsWorld) -> Result<(), eyre::Report> {
    match last_outcome(world)? {
        LastOutcome::Tasks(result) => {
            let tasks = result
                .value()
                .ok_or_else(|| eyre::eyre!("expected a successful listing, got {result:?}"))?;
            eyre::ensure!(tasks.is_empty(), "expected no tasks, found {}", tasks.len());
            Ok(())
        }
        other => Err(eyre::eyre!("expected a task listing, got {other:?}")),
    }
}

#[then("no task is stored")]
fn no_task_is_stored(world: &OperationResultsWorld) -> Result<(), eyre::Report> {
    let repository = world.database.task_repository();
    let stored = repository.tasks().len().wrap_err("count stored tasks")?;
    let staged = repository.tasks().staged_len().wrap_err("count staged tasks")?;
    eyre::ensure!(
        stored == 0 && staged == 0,
        "expected no tasks, found {stored} stored and {staged} staged"
    );
    Ok(())
}

#[then(r#""{name}" has email "{email}""#)]
fn user_has_email(
    world: &OperationResultsWorld,
    name: String,
    email: String,
) -> Result<(), eyre::Report> {
    let id = world.registered_id(&name)?;
    let user = run_async(world.users.get_by_id(id))
        .wrap_err("load user")?
        .into_result()
        .map_err(|errors| eyre::eyre!("user lookup failed: {}", errors.first()))?;
    eyre::ensure!(
        user.email().as_str() == email,
        "expected email {email}, found {}",
        user.email()
    );
    Ok(())
}

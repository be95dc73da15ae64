//! Given steps for operation result BDD scenarios.

use super::world::{OperationResultsWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::user::services::CreateUserRequest;

#[given(r#"a registered user "{name}" with email "{email}""#)]
fn registered_user(
    world: &mut OperationResultsWorld,
    name: String,
    email: String,
) -> Result<(), eyre::Report> {
    let result = run_async(world.users.add(CreateUserRequest::new(name.as_str(), email)))
        .wrap_err("register user for scenario")?;
    let user = result
        .into_result()
        .map_err(|errors| eyre::eyre!("user registration rejected: {}", errors.first()))?;
    world.registered.insert(name, user.id());
    Ok(())
}

#[given("no stored tasks")]
fn no_stored_tasks(world: &OperationResultsWorld) -> Result<(), eyre::Report> {
    let stored = world
        .database
        .task_repository()
        .tasks()
        .len()
        .wrap_err("count stored tasks")?;
    eyre::ensure!(stored == 0, "expected an empty task table, found {stored}");
    Ok(())
}

//! Integration tests for the task service.

use super::helpers::{Services, into_value, services};
use chrono::{TimeDelta, Utc};
use rstest::rstest;
use taskboard::envelope::StatusClass;
use taskboard::task::domain::{DUE_DATE_KEY, TITLE_KEY, TaskId, USER_ID_KEY};
use taskboard::task::services::{CreateTaskRequest, UpdateTaskRequest};
use taskboard::user::domain::UserId;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_carries_owner(services: Services) -> Result<(), eyre::Report> {
    let ana = services.register("Ana", "ana@example.com").await?;
    let due = Utc::now() + TimeDelta::days(3);

    let created = into_value(
        services
            .tasks
            .add(
                CreateTaskRequest::new("Write report", ana.id())
                    .with_description("  quarterly numbers  ")
                    .with_due_date(due),
            )
            .await?,
    )?;

    assert_eq!(created.owner().map(|u| u.id()), Some(ana.id()));
    assert_eq!(created.description(), Some("quarterly numbers"));
    assert_eq!(created.due_date(), Some(due));
    assert!(!created.is_completed());

    let fetched = into_value(services.tasks.get_by_id(created.id()).await?)?;
    assert_eq!(fetched, created);
    assert_eq!(fetched.owner().map(|u| u.email().as_str()), Some("ana@example.com"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_task_for_unknown_owner_reports_structure_first(
    services: Services,
) -> Result<(), eyre::Report> {
    let result = services
        .tasks
        .add(CreateTaskRequest::new("x", UserId::new()))
        .await?;

    let errors = result.errors().ok_or_else(|| eyre::eyre!("expected failure"))?;
    let keys: Vec<_> = errors.iter().filter_map(|e| e.key()).collect();
    assert_eq!(keys, [TITLE_KEY]);
    assert!(services.database.task_repository().tasks().is_empty()?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn past_due_date_is_rejected(services: Services) -> Result<(), eyre::Report> {
    let ana = services.register("Ana", "ana@example.com").await?;

    let result = services
        .tasks
        .add(
            CreateTaskRequest::new("Write report", ana.id())
                .with_due_date(Utc::now() - TimeDelta::days(1)),
        )
        .await?;

    let error = result.first_error().ok_or_else(|| eyre::eyre!("expected failure"))?;
    assert_eq!(error.status(), StatusClass::BAD_REQUEST);
    assert_eq!(error.key(), Some(DUE_DATE_KEY));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassigning_to_missing_owner_is_rejected(services: Services) -> Result<(), eyre::Report> {
    let ana = services.register("Ana", "ana@example.com").await?;
    let task = into_value(
        services
            .tasks
            .add(CreateTaskRequest::new("Write report", ana.id()))
            .await?,
    )?;

    let result = services
        .tasks
        .update(task.id(), UpdateTaskRequest::new("Write report", UserId::new()))
        .await?;

    let error = result.first_error().ok_or_else(|| eyre::eyre!("expected failure"))?;
    assert_eq!(error.key(), Some(USER_ID_KEY));
    let stored = into_value(services.tasks.get_by_id(task.id()).await?)?;
    assert_eq!(stored.user_id(), ana.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassigning_to_another_user_moves_the_task(
    services: Services,
) -> Result<(), eyre::Report> {
    let ana = services.register("Ana", "ana@example.com").await?;
    let bia = services.register("Bia", "bia@example.com").await?;
    let task = into_value(
        services
            .tasks
            .add(CreateTaskRequest::new("Write report", ana.id()))
            .await?,
    )?;

    let moved = into_value(
        services
            .tasks
            .update(task.id(), UpdateTaskRequest::new("Review report", bia.id()))
            .await?,
    )?;

    assert_eq!(moved.owner().map(|u| u.id()), Some(bia.id()));
    assert!(into_value(services.tasks.list_by_user(ana.id()).await?)?.is_empty());
    assert_eq!(into_value(services.tasks.list_by_user(bia.id()).await?)?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_round_trip(services: Services) -> Result<(), eyre::Report> {
    let ana = services.register("Ana", "ana@example.com").await?;
    let task = into_value(
        services
            .tasks
            .add(CreateTaskRequest::new("Write report", ana.id()))
            .await?,
    )?;

    let completed = into_value(services.tasks.complete(task.id()).await?)?;
    let reopened = into_value(services.tasks.reopen(task.id()).await?)?;

    assert!(completed.is_completed());
    assert!(!reopened.is_completed());
    assert!(reopened.updated_at() >= completed.updated_at());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_gone(services: Services) -> Result<(), eyre::Report> {
    let ana = services.register("Ana", "ana@example.com").await?;
    let task = into_value(
        services
            .tasks
            .add(CreateTaskRequest::new("Write report", ana.id()))
            .await?,
    )?;

    assert!(into_value(services.tasks.delete(task.id()).await?)?);
    let again = services.tasks.delete(task.id()).await?;

    assert_eq!(
        again.first_error().map(|e| e.status()),
        Some(StatusClass::NOT_FOUND)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_operations_are_not_found(services: Services) -> Result<(), eyre::Report> {
    let id = TaskId::new();

    let statuses = [
        services.tasks.get_by_id(id).await?.first_error().map(|e| e.status()),
        services.tasks.complete(id).await?.first_error().map(|e| e.status()),
        services.tasks.reopen(id).await?.first_error().map(|e| e.status()),
    ];

    assert!(statuses.iter().all(|s| *s == Some(StatusClass::NOT_FOUND)));
    Ok(())
}

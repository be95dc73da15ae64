//! Integration tests for the user service.

use std::sync::Arc;

use super::helpers::{Services, into_value, services};
use rstest::rstest;
use taskboard::envelope::StatusClass;
use taskboard::persistence::Repository;
use taskboard::task::services::CreateTaskRequest;
use taskboard::user::domain::{EMAIL_KEY, NAME_KEY, UserId};
use taskboard::user::services::{CreateUserRequest, UpdateUserRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_user_is_retrievable(services: Services) -> Result<(), eyre::Report> {
    let created = services.register("  Ana  ", "ana@example.com").await?;

    let fetched = into_value(services.users.get_by_id(created.id()).await?)?;

    assert_eq!(fetched, created);
    assert_eq!(fetched.name(), "Ana");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_user_reports_every_field(services: Services) -> Result<(), eyre::Report> {
    let result = services
        .users
        .add(CreateUserRequest::new("", "not-an-email"))
        .await?;

    let errors = result.errors().ok_or_else(|| eyre::eyre!("expected failure"))?;
    let keys: Vec<_> = errors.iter().filter_map(|e| e.key()).collect();
    assert_eq!(keys, [NAME_KEY, EMAIL_KEY]);
    assert!(errors.iter().all(|e| e.status() == StatusClass::BAD_REQUEST));
    assert!(services.database.user_repository().users().is_empty()?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_registration_with_same_email_is_rejected(
    services: Services,
) -> Result<(), eyre::Report> {
    services.register("Ana", "ana@example.com").await?;

    let result = services
        .users
        .add(CreateUserRequest::new("Another Ana", "ana@example.com"))
        .await?;

    let error = result.first_error().ok_or_else(|| eyre::eyre!("expected failure"))?;
    assert_eq!(error.status(), StatusClass::BAD_REQUEST);
    assert_eq!(error.key(), Some(EMAIL_KEY));
    assert_eq!(services.database.user_repository().users().len()?, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_to_free_email_is_persisted(services: Services) -> Result<(), eyre::Report> {
    let ana = services.register("Ana", "ana@example.com").await?;

    let updated = into_value(
        services
            .users
            .update(ana.id(), UpdateUserRequest::new("Ana", "ana@work.example"))
            .await?,
    )?;

    assert_eq!(updated.id(), ana.id());
    assert_eq!(updated.created_at(), ana.created_at());
    let fetched = into_value(services.users.get_by_id(ana.id()).await?)?;
    assert_eq!(fetched.email().as_str(), "ana@work.example");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_user(services: Services) -> Result<(), eyre::Report> {
    let ana = services.register("Ana", "ana@example.com").await?;

    let deleted = into_value(services.users.delete(ana.id()).await?)?;
    let lookup = services.users.get_by_id(ana.id()).await?;

    assert!(deleted);
    assert_eq!(
        lookup.first_error().map(|e| e.status()),
        Some(StatusClass::NOT_FOUND)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_id_is_not_found(services: Services) -> Result<(), eyre::Report> {
    let result = services
        .users
        .update(UserId::new(), UpdateUserRequest::new("Ana", "ana@example.com"))
        .await?;

    let error = result.first_error().ok_or_else(|| eyre::eyre!("expected failure"))?;
    assert_eq!(error.status(), StatusClass::NOT_FOUND);
    assert_eq!(error.key(), Some("id"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_pages_through_users_in_creation_order(
    services: Services,
) -> Result<(), eyre::Report> {
    for index in 0..5 {
        services
            .register(&format!("User {index}"), &format!("user{index}@example.com"))
            .await?;
    }

    let first = into_value(services.users.get_all(1, 2).await?)?;
    let last = into_value(services.users.get_all(3, 2).await?)?;
    let beyond = into_value(services.users.get_all(4, 2).await?)?;

    let names: Vec<_> = first.iter().map(|u| u.name().to_owned()).collect();
    assert_eq!(names, ["User 0", "User 1"]);
    assert_eq!(last.len(), 1);
    assert!(beyond.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_registrations_are_all_stored(services: Services) -> Result<(), eyre::Report> {
    const REGISTRATIONS: usize = 200;
    let services = Arc::new(services);

    let handles: Vec<_> = (0..REGISTRATIONS)
        .map(|index| {
            let shared = Arc::clone(&services);
            tokio::spawn(async move {
                shared
                    .users
                    .add(CreateUserRequest::new(
                        format!("User {index}"),
                        format!("user{index}@example.com"),
                    ))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await??.is_success() {
            successes += 1;
        }
    }

    let stored = services.database.user_repository().get_all().await?;
    assert_eq!(successes, REGISTRATIONS);
    assert_eq!(stored.len(), REGISTRATIONS);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_user_removes_their_tasks(services: Services) -> Result<(), eyre::Report> {
    let ana = services.register("Ana", "ana@example.com").await?;
    let bia = services.register("Bia", "bia@example.com").await?;
    let owned = into_value(
        services
            .tasks
            .add(CreateTaskRequest::new("Write report", ana.id()))
            .await?,
    )?;
    let kept = into_value(
        services
            .tasks
            .add(CreateTaskRequest::new("Review report", bia.id()))
            .await?,
    )?;

    assert!(into_value(services.users.delete(ana.id()).await?)?);

    let lookup = services.tasks.get_by_id(owned.id()).await?;
    assert_eq!(
        lookup.first_error().map(|e| e.status()),
        Some(StatusClass::NOT_FOUND)
    );
    assert!(into_value(services.tasks.list_by_user(ana.id()).await?)?.is_empty());
    let remaining = into_value(services.tasks.get_by_id(kept.id()).await?)?;
    assert_eq!(remaining.owner().map(|u| u.id()), Some(bia.id()));
    Ok(())
}

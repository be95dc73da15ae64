//! Integration tests rendering service envelopes for a transport.

use super::helpers::{Services, into_value, services};
use rstest::rstest;
use serde_json::json;
use taskboard::envelope::StatusClass;
use taskboard::task::domain::TaskId;
use taskboard::task::services::CreateTaskRequest;
use taskboard::transport::dto::{TaskResponse, UserResponse};
use taskboard::transport::{TransportOutcome, mapper};
use taskboard::user::services::CreateUserRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_user_maps_to_location_and_body(services: Services) -> Result<(), eyre::Report> {
    let result = services
        .users
        .add(CreateUserRequest::new("Ana", "ana@example.com"))
        .await?;

    let outcome = mapper::to_created_with(result, UserResponse::from, UserResponse::location);

    let (location, body) = match outcome {
        TransportOutcome::Created { location, body } => (location, body),
        other => return Err(eyre::eyre!("expected Created, got {other:?}")),
    };
    let user = body.data().ok_or_else(|| eyre::eyre!("missing body data"))?;
    assert_eq!(location, format!("/api/users/{}", user.id));
    assert_eq!(user.email, "ana@example.com");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_user_maps_to_bad_request_body(services: Services) -> Result<(), eyre::Report> {
    let result = services.users.add(CreateUserRequest::new("A", "ana")).await?;

    let outcome = mapper::to_outcome_with(result, UserResponse::from);

    assert_eq!(outcome.status(), StatusClass::BAD_REQUEST);
    let body = serde_json::to_value(outcome.body().ok_or_else(|| eyre::eyre!("missing body"))?)?;
    assert_eq!(body["data"], json!(null));
    assert_eq!(body["errors"][0]["key"], "Name");
    assert_eq!(body["errors"][1]["key"], "Email");
    assert_eq!(body["errors"][1]["statusCode"], 400);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_listing_maps_each_element(services: Services) -> Result<(), eyre::Report> {
    let ana = services.register("Ana", "ana@example.com").await?;
    into_value(
        services
            .tasks
            .add(CreateTaskRequest::new("Write report", ana.id()))
            .await?,
    )?;

    let outcome = mapper::to_outcome_each(services.tasks.get_all(1, 10).await?, TaskResponse::from);

    assert_eq!(outcome.status(), StatusClass::OK);
    let tasks = outcome
        .body()
        .and_then(|body| body.data())
        .ok_or_else(|| eyre::eyre!("missing body data"))?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(
        tasks.first().and_then(|t| t.user.as_ref()).map(|u| u.name.as_str()),
        Some("Ana")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_maps_to_no_content_or_not_found(services: Services) -> Result<(), eyre::Report> {
    let ana = services.register("Ana", "ana@example.com").await?;

    let removed = mapper::to_no_content(services.users.delete(ana.id()).await?);
    let missing = mapper::to_no_content(services.tasks.delete(TaskId::new()).await?);

    assert_eq!(removed, TransportOutcome::NoContent);
    assert_eq!(missing.status(), StatusClass::NOT_FOUND);
    Ok(())
}

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn health_reports_ok() {
    let app = common::test_router(common::test_state().await);
    let (status, body) = common::send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn company_crud_over_http() {
    let app = common::test_router(common::test_state().await);

    let (status, body) = common::send(&app, "GET", "/api/v1/companies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let (status, created) = common::send(
        &app,
        "POST",
        "/api/v1/companies",
        Some(json!({ "name": "Acme AB", "company_type": "employer" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Acme AB");
    assert!(created["updated_date"].is_null());
    assert!(created["last_contact"].is_null());
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = common::send(
        &app,
        "PATCH",
        &format!("/api/v1/companies/{}", id),
        Some(json!({ "notes": "met at the career fair" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, fetched) =
        common::send(&app, "GET", &format!("/api/v1/companies/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["notes"], "met at the career fair");
    assert!(fetched["updated_date"].is_string());

    let (status, found) =
        common::send(&app, "GET", "/api/v1/companies/search?name=acme", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (status, _) =
        common::send(&app, "DELETE", &format!("/api/v1/companies/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) =
        common::send(&app, "DELETE", &format!("/api/v1/companies/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn validation_failures_map_to_bad_request() {
    let app = common::test_router(common::test_state().await);

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/companies",
        Some(json!({ "name": "Acme AB", "company_type": "agency" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(
        body["message"],
        "validation error on field 'company_type': unknown company type 'agency'"
    );

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/applications",
        Some(json!({ "job_title": "Dev", "job_ad_url": "u", "remote_status_type": "office" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "validation error: CompanyID and RecruiterID cannot both be empty"
    );

    let (status, body) = common::send(
        &app,
        "PATCH",
        "/api/v1/events/8f9a4f64-8d8e-4a8b-9a51-2d7f0d4b3c11",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "validation error: nothing to update");
}

#[tokio::test]
async fn application_with_events_and_extra_data() {
    let app = common::test_router(common::test_state().await);

    let (_, company) = common::send(
        &app,
        "POST",
        "/api/v1/companies",
        Some(json!({ "name": "Acme AB", "company_type": "recruiter" })),
    )
    .await;
    let company_id = company["id"].as_str().unwrap().to_string();

    let (status, application) = common::send(
        &app,
        "POST",
        "/api/v1/applications",
        Some(json!({
            "recruiter_id": company_id,
            "job_title": "Backend Developer",
            "remote_status_type": "remote"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let application_id = application["id"].as_str().unwrap().to_string();

    let mut event_ids = Vec::new();
    for (event_type, date) in [
        ("applied", "2025-01-01T00:00:00Z"),
        ("interviewBooked", "2025-01-05T00:00:00Z"),
    ] {
        let (status, event) = common::send(
            &app,
            "POST",
            "/api/v1/events",
            Some(json!({ "event_type": event_type, "event_date": date })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        event_ids.push(event["id"].as_str().unwrap().to_string());
    }

    for event_id in &event_ids {
        let (status, _) = common::send(
            &app,
            "POST",
            "/api/v1/application-events",
            Some(json!({ "application_id": application_id, "event_id": event_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/v1/application-events",
        Some(json!({ "application_id": application_id, "event_id": event_ids[0] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "conflict error on insert: ApplicationID and EventID combination already exists in database."
    );

    let (status, status_body) = common::send(
        &app,
        "GET",
        &format!("/api/v1/applications/{}/status", application_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_body["current_status"], "interviewBooked");

    let (status, fetched) = common::send(
        &app,
        "GET",
        &format!(
            "/api/v1/applications/{}?include_events=ids",
            application_id
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["current_status"], "interviewBooked");
    assert_eq!(fetched["events"].as_array().unwrap().len(), 2);
    assert!(fetched.get("persons").is_none());

    let (status, _) = common::send(
        &app,
        "GET",
        &format!(
            "/api/v1/applications/{}?include_events=everything",
            application_id
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::send(
        &app,
        "DELETE",
        &format!(
            "/api/v1/application-events?application_id={}&event_id={}",
            application_id, event_ids[1]
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, links) = common::send(
        &app,
        "GET",
        &format!("/api/v1/application-events?application_id={}", application_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(links.as_array().unwrap().len(), 1);
    assert_eq!(links[0]["event_id"], event_ids[0].as_str());
}

#[tokio::test]
async fn person_with_linked_companies() {
    let app = common::test_router(common::test_state().await);

    let (_, company) = common::send(
        &app,
        "POST",
        "/api/v1/companies",
        Some(json!({ "name": "Acme AB", "company_type": "employer" })),
    )
    .await;
    let (status, person) = common::send(
        &app,
        "POST",
        "/api/v1/persons",
        Some(json!({ "name": "Jane Doe", "person_type": "CTO", "email": "jane@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = common::send(
        &app,
        "POST",
        "/api/v1/company-persons",
        Some(json!({ "company_id": company["id"], "person_id": person["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, fetched) = common::send(
        &app,
        "GET",
        &format!(
            "/api/v1/persons/{}?include_companies=all",
            person["id"].as_str().unwrap()
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["companies"][0]["name"], "Acme AB");
    assert_eq!(fetched["person_type"], "CTO");
}

mod common;

use jobsearch_backend::error::Error;
use jobsearch_backend::models::application::{
    ApplicationUpdate, NewApplication, RemoteStatusType,
};
use jobsearch_backend::models::association::NewAssociation;
use jobsearch_backend::models::company::{CompanyType, NewCompany};
use jobsearch_backend::models::event::{EventType, NewEvent};
use jobsearch_backend::AppState;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

async fn seed_company(state: &AppState) -> Uuid {
    let company = state
        .company_service
        .create(NewCompany {
            id: None,
            name: "Acme AB".into(),
            company_type: CompanyType::Employer,
            notes: None,
            last_contact: None,
            created_date: None,
        })
        .await
        .expect("seed company");
    company.id
}

fn new_application(company_id: Option<Uuid>, job_title: Option<&str>) -> NewApplication {
    NewApplication {
        id: None,
        company_id,
        recruiter_id: None,
        job_title: job_title.map(str::to_string),
        job_ad_url: None,
        country: None,
        area: None,
        remote_status_type: RemoteStatusType::Office,
        weekdays_in_office: None,
        estimated_cycle_time: None,
        estimated_commute_time: None,
        application_date: None,
        created_date: None,
    }
}

async fn seed_event(state: &AppState, event_type: EventType, day: u32) -> Uuid {
    state
        .event_service
        .create(NewEvent {
            id: None,
            event_type,
            description: None,
            notes: None,
            event_date: common::at(2025, 1, day),
            created_date: None,
        })
        .await
        .expect("seed event")
        .id
}

#[tokio::test]
async fn company_or_recruiter_is_required() {
    let state = common::test_state().await;
    let mut application = new_application(None, Some("Dev"));
    application.job_ad_url = Some("u".into());

    let err = assert_err!(state.application_service.create(application).await);
    assert_eq!(
        err,
        Error::validation("CompanyID and RecruiterID cannot both be empty")
    );
}

#[tokio::test]
async fn job_title_or_ad_url_is_required() {
    let state = common::test_state().await;
    let company_id = seed_company(&state).await;

    let err = assert_err!(
        state
            .application_service
            .create(new_application(Some(company_id), None))
            .await
    );
    assert_eq!(
        err.to_string(),
        "validation error: JobTitle and JobAdURL cannot both be empty"
    );
}

#[tokio::test]
async fn unknown_company_is_a_foreign_key_validation_error() {
    let state = common::test_state().await;

    let err = assert_err!(
        state
            .application_service
            .create(new_application(Some(Uuid::new_v4()), Some("Dev")))
            .await
    );
    assert_eq!(err.to_string(), "validation error: Foreign key does not exist");
}

#[tokio::test]
async fn update_to_unknown_recruiter_is_a_foreign_key_validation_error() {
    let state = common::test_state().await;
    let company_id = seed_company(&state).await;
    let application = assert_ok!(
        state
            .application_service
            .create(new_application(Some(company_id), Some("Dev")))
            .await
    );

    let err = assert_err!(
        state
            .application_service
            .update(ApplicationUpdate {
                id: application.id,
                recruiter_id: Some(Uuid::new_v4()),
                ..Default::default()
            })
            .await
    );
    assert_eq!(err, Error::validation("Foreign key does not exist"));
}

#[tokio::test]
async fn update_with_nothing_to_update_is_rejected() {
    let state = common::test_state().await;
    let err = assert_err!(
        state
            .application_service
            .update(ApplicationUpdate {
                id: Uuid::new_v4(),
                ..Default::default()
            })
            .await
    );
    assert_eq!(err.to_string(), "validation error: nothing to update");
}

#[tokio::test]
async fn search_by_job_title() {
    let state = common::test_state().await;
    let company_id = seed_company(&state).await;
    for title in ["Senior Rust Engineer", "Frontend Developer", "rust mentor"] {
        assert_ok!(
            state
                .application_service
                .create(new_application(Some(company_id), Some(title)))
                .await
        );
    }

    let found = assert_ok!(state.application_service.get_all_by_job_title("RUST").await);
    let titles: Vec<&str> = found
        .iter()
        .filter_map(|a| a.job_title.as_deref())
        .collect();
    assert_eq!(titles, vec!["rust mentor", "Senior Rust Engineer"]);

    let err = assert_err!(state.application_service.get_all_by_job_title("golang").await);
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn update_persists_remote_status_and_bounds() {
    let state = common::test_state().await;
    let company_id = seed_company(&state).await;
    let application = assert_ok!(
        state
            .application_service
            .create(new_application(Some(company_id), Some("Dev")))
            .await
    );

    assert_ok!(
        state
            .application_service
            .update(ApplicationUpdate {
                id: application.id,
                remote_status_type: Some(RemoteStatusType::Hybrid),
                weekdays_in_office: Some(2),
                ..Default::default()
            })
            .await
    );

    let updated = assert_ok!(state.application_service.get_by_id(application.id).await);
    assert_eq!(updated.remote_status_type, RemoteStatusType::Hybrid);
    assert_eq!(updated.weekdays_in_office, Some(2));
    assert_eq!(updated.job_title.as_deref(), Some("Dev"));
    assert!(updated.updated_date.is_some());
}

#[tokio::test]
async fn current_status_is_the_latest_linked_event() {
    let state = common::test_state().await;
    let company_id = seed_company(&state).await;
    let application = assert_ok!(
        state
            .application_service
            .create(new_application(Some(company_id), Some("Dev")))
            .await
    );
    assert_eq!(
        assert_ok!(state.application_service.current_status(application.id).await),
        None
    );

    let applied = seed_event(&state, EventType::Applied, 1).await;
    let interview = seed_event(&state, EventType::InterviewBooked, 5).await;
    for event_id in [interview, applied] {
        assert_ok!(
            state
                .application_event_service
                .associate(NewAssociation::new(application.id, event_id, None))
                .await
        );
    }

    assert_eq!(
        assert_ok!(state.application_service.current_status(application.id).await),
        Some(EventType::InterviewBooked)
    );
}

#[tokio::test]
async fn deleting_an_application_removes_its_links() {
    let state = common::test_state().await;
    let company_id = seed_company(&state).await;
    let application = assert_ok!(
        state
            .application_service
            .create(new_application(Some(company_id), Some("Dev")))
            .await
    );
    let event_id = seed_event(&state, EventType::Applied, 1).await;
    assert_ok!(
        state
            .application_event_service
            .associate(NewAssociation::new(application.id, event_id, None))
            .await
    );

    assert_ok!(state.application_service.delete(application.id).await);

    assert_eq!(
        assert_ok!(state.application_event_service.get_all().await),
        None
    );
    assert_ok!(state.event_service.get_by_id(event_id).await);
}

#[tokio::test]
async fn update_cannot_blank_the_only_job_title() {
    let state = common::test_state().await;
    let company_id = seed_company(&state).await;
    let application = assert_ok!(
        state
            .application_service
            .create(new_application(Some(company_id), Some("Dev")))
            .await
    );

    let err = assert_err!(
        state
            .application_service
            .update(ApplicationUpdate {
                id: application.id,
                job_title: Some(String::new()),
                ..Default::default()
            })
            .await
    );
    assert_eq!(err, Error::validation_field("job_title", "cannot be empty"));

    let stored = assert_ok!(state.application_service.get_by_id(application.id).await);
    assert_eq!(stored.job_title.as_deref(), Some("Dev"));
}

#[tokio::test]
async fn job_title_search_folds_non_ascii_case() {
    let state = common::test_state().await;
    let company_id = seed_company(&state).await;
    for title in ["Utvecklare i Älvsjö", "Tester"] {
        assert_ok!(
            state
                .application_service
                .create(new_application(Some(company_id), Some(title)))
                .await
        );
    }

    let found = assert_ok!(state.application_service.get_all_by_job_title("ÄLVSJÖ").await);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].job_title.as_deref(), Some("Utvecklare i Älvsjö"));
}

mod common;

use jobsearch_backend::error::Error;
use jobsearch_backend::models::association::NewAssociation;
use jobsearch_backend::models::company::{CompanyType, NewCompany};
use jobsearch_backend::models::person::{NewPerson, PersonType, PersonUpdate};
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

fn new_person(name: &str) -> NewPerson {
    NewPerson {
        id: None,
        name: name.to_string(),
        person_type: PersonType::Developer,
        email: None,
        phone: None,
        notes: None,
        created_date: None,
    }
}

#[tokio::test]
async fn create_uses_the_service_clock() {
    let now = common::at(2025, 5, 20);
    let state = common::test_state_at(now).await;

    let person = assert_ok!(state.person_service.create(new_person("Jane Doe")).await);
    assert_eq!(person.created_date, now);
    assert_eq!(person.updated_date, None);
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let state = common::test_state().await;
    let err = assert_err!(state.person_service.create(new_person("")).await);
    assert_eq!(err, Error::validation_field("name", "cannot be empty"));
}

#[tokio::test]
async fn search_and_update() {
    let state = common::test_state().await;
    let jane = assert_ok!(state.person_service.create(new_person("Jane Doe")).await);
    assert_ok!(state.person_service.create(new_person("John Roe")).await);

    let found = assert_ok!(state.person_service.get_all_by_name("DOE").await);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, jane.id);

    assert_ok!(
        state
            .person_service
            .update(PersonUpdate {
                id: jane.id,
                person_type: Some(PersonType::Hr),
                email: Some("jane@example.com".into()),
                ..Default::default()
            })
            .await
    );
    let updated = assert_ok!(state.person_service.get_by_id(jane.id).await);
    assert_eq!(updated.person_type, PersonType::Hr);
    assert_eq!(updated.email.as_deref(), Some("jane@example.com"));
    assert_eq!(updated.name, "Jane Doe");
}

#[tokio::test]
async fn deleting_a_person_cascades_to_company_links() {
    let state = common::test_state().await;
    let person = assert_ok!(state.person_service.create(new_person("Jane Doe")).await);
    let company = assert_ok!(
        state
            .company_service
            .create(NewCompany {
                id: None,
                name: "Acme AB".into(),
                company_type: CompanyType::Consultancy,
                notes: None,
                last_contact: None,
                created_date: None,
            })
            .await
    );
    assert_ok!(
        state
            .company_person_service
            .associate(NewAssociation::new(company.id, person.id, None))
            .await
    );

    assert_ok!(state.person_service.delete(person.id).await);
    let links = assert_ok!(
        state
            .company_person_service
            .get_by_id(Some(company.id), None)
            .await
    );
    assert!(links.is_empty());

    let err = assert_err!(state.person_service.get_by_id(person.id).await);
    assert!(matches!(err, Error::NotFound(_)));
    let err = assert_err!(state.person_service.delete(Uuid::nil()).await);
    assert!(matches!(err, Error::Validation { .. }));
}

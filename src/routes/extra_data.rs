use std::future::Future;

use uuid::Uuid;

use crate::dto::common_dto::{ExtraData, IncludeExtraDataType};
use crate::dto::company_dto::CompanyResponse;
use crate::dto::event_dto::EventResponse;
use crate::dto::person_dto::PersonResponse;
use crate::error::Result;
use crate::models::association::Association;
use crate::services::association_service::AssociationService;
use crate::AppState;

/// Linked ids on the side opposite to `id`, newest link first.
async fn linked_ids<A: Association>(
    service: &AssociationService<A>,
    id: Uuid,
    from_left: bool,
) -> Result<Vec<Uuid>> {
    let rows = if from_left {
        service.get_by_id(Some(id), None).await?
    } else {
        service.get_by_id(None, Some(id)).await?
    };
    Ok(rows
        .iter()
        .map(|row| if from_left { row.right_id() } else { row.left_id() })
        .collect())
}

async fn build<T, F, Fut>(
    include: IncludeExtraDataType,
    ids: impl Future<Output = Result<Vec<Uuid>>>,
    fetch: F,
) -> Result<Option<ExtraData<T>>>
where
    F: Fn(Uuid) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match include {
        IncludeExtraDataType::None => Ok(None),
        IncludeExtraDataType::Ids => Ok(Some(ExtraData::Ids(ids.await?))),
        IncludeExtraDataType::All => {
            let ids = ids.await?;
            let mut items = Vec::with_capacity(ids.len());
            for id in ids {
                items.push(fetch(id).await?);
            }
            Ok(Some(ExtraData::All(items)))
        }
    }
}

async fn person(state: &AppState, id: Uuid) -> Result<PersonResponse> {
    state.person_service.get_by_id(id).await.map(Into::into)
}

async fn event(state: &AppState, id: Uuid) -> Result<EventResponse> {
    state.event_service.get_by_id(id).await.map(Into::into)
}

async fn company(state: &AppState, id: Uuid) -> Result<CompanyResponse> {
    state.company_service.get_by_id(id).await.map(Into::into)
}

pub async fn company_persons(
    state: &AppState,
    company_id: Uuid,
    include: IncludeExtraDataType,
) -> Result<Option<ExtraData<PersonResponse>>> {
    let ids = linked_ids(&state.company_person_service, company_id, true);
    build(include, ids, move |id| person(state, id)).await
}

pub async fn company_events(
    state: &AppState,
    company_id: Uuid,
    include: IncludeExtraDataType,
) -> Result<Option<ExtraData<EventResponse>>> {
    let ids = linked_ids(&state.company_event_service, company_id, true);
    build(include, ids, move |id| event(state, id)).await
}

pub async fn person_companies(
    state: &AppState,
    person_id: Uuid,
    include: IncludeExtraDataType,
) -> Result<Option<ExtraData<CompanyResponse>>> {
    let ids = linked_ids(&state.company_person_service, person_id, false);
    build(include, ids, move |id| company(state, id)).await
}

pub async fn application_persons(
    state: &AppState,
    application_id: Uuid,
    include: IncludeExtraDataType,
) -> Result<Option<ExtraData<PersonResponse>>> {
    let ids = linked_ids(&state.application_person_service, application_id, true);
    build(include, ids, move |id| person(state, id)).await
}

pub async fn application_events(
    state: &AppState,
    application_id: Uuid,
    include: IncludeExtraDataType,
) -> Result<Option<ExtraData<EventResponse>>> {
    let ids = linked_ids(&state.application_event_service, application_id, true);
    build(include, ids, move |id| event(state, id)).await
}

pub async fn event_persons(
    state: &AppState,
    event_id: Uuid,
    include: IncludeExtraDataType,
) -> Result<Option<ExtraData<PersonResponse>>> {
    let ids = linked_ids(&state.event_person_service, event_id, true);
    build(include, ids, move |id| person(state, id)).await
}

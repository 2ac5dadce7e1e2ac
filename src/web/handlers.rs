use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

use crate::error::{Entity, ServiceError};
use crate::forms::{AddressInput, ClientInput, IdParam};
use crate::models::SortState;
use crate::query::ClientQuery;
use crate::services;
use crate::views::json::{ActionResult, AddressRecordJson, ClientAddressJson, ClientJson};
use crate::views::{html, FilterView, IndexView, Pagination, SortHeaders};

use super::extract::{BodyRejection, Representation, Submitted};
use super::response::{self, json, page};
use super::AppState;

/// Index query string. Every value is optional and read leniently.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexParams {
    pub filter_text: Option<String>,
    pub page: Option<String>,
    pub sort_order: Option<String>,
}

impl IndexParams {
    fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse().ok())
            .unwrap_or(1)
    }
}

pub async fn index(
    State(state): State<AppState>,
    representation: Representation,
    Query(params): Query<IndexParams>,
) -> Response {
    let filter = params.filter_text.clone().unwrap_or_default();
    let page_number = params.page();
    let sort = SortState::parse_or_default(params.sort_order.as_deref());
    let request = ClientQuery::new(filter.clone(), sort, page_number, state.page_size);

    let loaded = match services::load_page(&state.db, &request).await {
        Ok(loaded) => loaded,
        Err(err) => return response::service_error(representation, err),
    };

    let view = IndexView::new(
        loaded.clients,
        Pagination::new(loaded.total, page_number, state.page_size),
        FilterView::new(filter),
        SortHeaders::new(sort),
    );

    match representation {
        Representation::Json => json(StatusCode::OK, view.to_json()),
        Representation::Html => page(StatusCode::OK, html::index_page(&view)),
    }
}

pub async fn delete_client(
    State(state): State<AppState>,
    representation: Representation,
    Query(query): Query<IdParam>,
    body: Option<Submitted<IdParam>>,
) -> Response {
    let id = query
        .id()
        .or_else(|| body.and_then(|Submitted(body)| body.id()));
    let Some(id) = id else {
        return response::missing_id(representation, Entity::Client);
    };

    match services::delete_client(&state.db, id).await {
        Ok(()) => match representation {
            Representation::Json => json(
                StatusCode::OK,
                ActionResult::succeeded("Client deleted successfully"),
            ),
            Representation::Html => response::back_to_index(),
        },
        Err(err) => response::service_error(representation, err),
    }
}

pub async fn edit_client_form(
    State(state): State<AppState>,
    representation: Representation,
    Query(query): Query<IdParam>,
) -> Response {
    let Some(id) = query.id() else {
        return response::missing_id(representation, Entity::Client);
    };

    match services::get_client(&state.db, id).await {
        Ok(Some(client)) => match representation {
            Representation::Json => json(
                StatusCode::OK,
                ActionResult::with_data(ClientJson::from(&client)),
            ),
            Representation::Html => page(
                StatusCode::OK,
                html::client_form(&ClientInput::from(&client), None),
            ),
        },
        Ok(None) => response::not_found(representation, Entity::Client),
        Err(err) => response::service_error(representation, err),
    }
}

pub async fn edit_client(
    State(state): State<AppState>,
    representation: Representation,
    body: Result<Submitted<ClientInput>, BodyRejection>,
) -> Response {
    let input = match body {
        Ok(Submitted(input)) => input,
        Err(rejection) => {
            tracing::debug!(%rejection, "unusable client body");
            return response::bad_request(representation, "Client data is null");
        }
    };

    match services::update_client(&state.db, &input).await {
        Ok(update) => match representation {
            Representation::Json => json(
                StatusCode::OK,
                ActionResult::with_data(ClientJson::from(&update)),
            ),
            Representation::Html => response::back_to_index(),
        },
        Err(ServiceError::Validation(errors)) if representation == Representation::Html => page(
            StatusCode::UNPROCESSABLE_ENTITY,
            html::client_form(&input, Some(&errors)),
        ),
        Err(err) => response::service_error(representation, err),
    }
}

/// The address form is reached through the owning client's id.
pub async fn edit_address_form(
    State(state): State<AppState>,
    representation: Representation,
    Query(query): Query<IdParam>,
) -> Response {
    let Some(id) = query.id() else {
        return response::missing_id(representation, Entity::Client);
    };

    let client = match services::get_client(&state.db, id).await {
        Ok(Some(client)) => client,
        Ok(None) => return response::not_found(representation, Entity::Client),
        Err(err) => return response::service_error(representation, err),
    };

    match (representation, &client.address) {
        (Representation::Json, _) => json(
            StatusCode::OK,
            ActionResult::with_data(ClientAddressJson::from(&client)),
        ),
        (Representation::Html, Some(address)) => page(
            StatusCode::OK,
            html::address_form(&AddressInput::from(address), None),
        ),
        (Representation::Html, None) => response::not_found(representation, Entity::Address),
    }
}

pub async fn edit_address(
    State(state): State<AppState>,
    representation: Representation,
    body: Result<Submitted<AddressInput>, BodyRejection>,
) -> Response {
    let input = match body {
        Ok(Submitted(input)) => input,
        Err(rejection) => {
            tracing::debug!(%rejection, "unusable address body");
            return response::bad_request(representation, "Address data is null");
        }
    };

    match services::update_address(&state.db, &input).await {
        Ok(update) => match representation {
            Representation::Json => json(
                StatusCode::OK,
                ActionResult::with_data(AddressRecordJson::from(&update)),
            ),
            Representation::Html => response::back_to_index(),
        },
        Err(ServiceError::Validation(errors)) if representation == Representation::Html => page(
            StatusCode::UNPROCESSABLE_ENTITY,
            html::address_form(&input, Some(&errors)),
        ),
        Err(err) => response::service_error(representation, err),
    }
}

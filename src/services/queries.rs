use crate::db::Database;
use crate::error::{Result, ServiceError};
use crate::models::Client;
use crate::query::{ClientFilter, ClientQuery};

/// One page of the client list plus the number of clients matching the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPage {
    pub clients: Vec<Client>,
    pub total: i64,
}

/// Filter, sort and page the client list.
pub async fn get_clients(db: &Database, request: &ClientQuery) -> Result<Vec<Client>> {
    db.fetch_client_page(request).await.map_err(|err| {
        tracing::error!(
            error = %err,
            filter = %request.filter,
            sort = %request.sort,
            page = request.page,
            "failed to retrieve clients"
        );
        ServiceError::QueryFailed(err)
    })
}

/// Number of clients matching `filter_text`, ignoring paging.
pub async fn count_clients(db: &Database, filter_text: &str) -> Result<i64> {
    db.count_clients(&ClientFilter::new(filter_text))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, filter = %filter_text, "failed to count clients");
            ServiceError::QueryFailed(err)
        })
}

pub async fn load_page(db: &Database, request: &ClientQuery) -> Result<ClientPage> {
    let clients = get_clients(db, request).await?;
    let total = count_clients(db, &request.filter).await?;

    Ok(ClientPage { clients, total })
}

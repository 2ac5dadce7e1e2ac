use crate::db::Database;
use crate::error::{Entity, Result, ServiceError};
use crate::forms::{AddressInput, ClientInput};
use crate::models::{AddressUpdate, Client, ClientUpdate};
use crate::validation::{validate_address, validate_client};

/// Look up a client with its address. A missing client is `Ok(None)`.
pub async fn get_client(db: &Database, id: i64) -> Result<Option<Client>> {
    db.get_client(id).await.map_err(|err| {
        tracing::error!(error = %err, client_id = id, "failed to retrieve client");
        ServiceError::Storage(err)
    })
}

/// Delete a client and its address.
pub async fn delete_client(db: &Database, id: i64) -> Result<()> {
    match db.delete_client(id).await {
        Ok(true) => {
            tracing::info!(client_id = id, "client deleted");
            Ok(())
        }
        Ok(false) => {
            tracing::warn!(client_id = id, "client not found for deletion");
            Err(ServiceError::NotFound(Entity::Client))
        }
        Err(err) => {
            tracing::error!(error = %err, client_id = id, "failed to delete client");
            Err(ServiceError::Storage(err))
        }
    }
}

/// Validate a submitted client and merge it into the stored one. Returns the
/// validated record that was written.
pub async fn update_client(db: &Database, input: &ClientInput) -> Result<ClientUpdate> {
    let update = validate_client(input)?;

    match db.update_client(update.id, &update.fields).await {
        Ok(true) => {
            tracing::info!(client_id = update.id, "client updated");
            Ok(update)
        }
        Ok(false) => {
            tracing::warn!(client_id = update.id, "client not found for update");
            Err(ServiceError::NotFound(Entity::Client))
        }
        Err(err) => {
            tracing::error!(error = %err, client_id = update.id, "failed to update client");
            Err(ServiceError::Storage(err))
        }
    }
}

/// Validate a submitted address and overwrite the stored one in place.
pub async fn update_address(db: &Database, input: &AddressInput) -> Result<AddressUpdate> {
    let update = validate_address(input)?;

    match db.update_address(update.id, &update.fields).await {
        Ok(true) => {
            tracing::info!(address_id = update.id, "address updated");
            Ok(update)
        }
        Ok(false) => {
            tracing::warn!(address_id = update.id, "address not found for update");
            Err(ServiceError::NotFound(Entity::Address))
        }
        Err(err) => {
            tracing::error!(error = %err, address_id = update.id, "failed to update address");
            Err(ServiceError::Storage(err))
        }
    }
}

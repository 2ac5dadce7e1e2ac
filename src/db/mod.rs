pub mod seed;

use sqlx::any::AnyPoolOptions;
use sqlx::{AnyPool, Executor};

use crate::config::Config;
use crate::models::{Address, AddressFields, Client, ClientFields, ClientRow};
use crate::query::{self, ClientFilter, ClientQuery};

/// SQL dialect behind the pool. Only schema creation differs between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("sqlite:") {
            Backend::Sqlite
        } else {
            Backend::Postgres
        }
    }

    fn schema(self) -> [&'static str; 2] {
        match self {
            Backend::Postgres => [
                r#"
                CREATE TABLE IF NOT EXISTS addresses (
                    id BIGSERIAL PRIMARY KEY,
                    street_address TEXT NOT NULL,
                    city TEXT NOT NULL,
                    state TEXT NOT NULL,
                    zip TEXT NOT NULL
                )
                "#,
                r#"
                CREATE TABLE IF NOT EXISTS clients (
                    id BIGSERIAL PRIMARY KEY,
                    first_name TEXT NOT NULL,
                    last_name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    description TEXT,
                    address_id BIGINT REFERENCES addresses (id)
                )
                "#,
            ],
            Backend::Sqlite => [
                r#"
                CREATE TABLE IF NOT EXISTS addresses (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    street_address TEXT NOT NULL,
                    city TEXT NOT NULL,
                    state TEXT NOT NULL,
                    zip TEXT NOT NULL
                )
                "#,
                r#"
                CREATE TABLE IF NOT EXISTS clients (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    first_name TEXT NOT NULL,
                    last_name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    description TEXT,
                    address_id INTEGER REFERENCES addresses (id)
                )
                "#,
            ],
        }
    }
}

/// Database connection pool
#[derive(Clone, Debug)]
pub struct Database {
    pool: AnyPool,
    backend: Backend,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> sqlx::Result<Self> {
        Self::connect(config.database_url(), config.max_connections).await
    }

    pub async fn connect(url: &str, max_connections: u32) -> sqlx::Result<Self> {
        sqlx::any::install_default_drivers();

        let backend = Backend::from_url(url);
        let mut options = AnyPoolOptions::new().max_connections(max_connections);

        if backend == Backend::Sqlite {
            // Every connection to `sqlite::memory:` opens its own database,
            // so an in-memory store must live on exactly one connection.
            if url.contains(":memory:") {
                options = options
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
            }
            options = options.after_connect(|conn, _meta| {
                Box::pin(async move {
                    conn.execute("PRAGMA foreign_keys = ON").await?;
                    Ok(())
                })
            });
        }

        let pool = options.connect(url).await?;

        Ok(Self { pool, backend })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Create the `addresses` and `clients` tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> sqlx::Result<()> {
        for statement in self.backend.schema() {
            sqlx::query(statement).execute(self.get_pool()).await?;
        }
        Ok(())
    }

    // Client list operations
    pub async fn fetch_client_page(&self, request: &ClientQuery) -> sqlx::Result<Vec<Client>> {
        let window = request.window();
        if window.is_empty() {
            return Ok(Vec::new());
        }

        let filter = request.filter();
        let sql = query::page_statement(&filter, request.sort);

        let mut statement = sqlx::query_as::<_, ClientRow>(&sql);
        if let Some(pattern) = filter.pattern() {
            statement = statement.bind(pattern.to_string());
        }
        let rows = statement
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(self.get_pool())
            .await?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    pub async fn count_clients(&self, filter: &ClientFilter) -> sqlx::Result<i64> {
        let sql = query::count_statement(filter);

        let mut statement = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(pattern) = filter.pattern() {
            statement = statement.bind(pattern.to_string());
        }
        let count = statement.fetch_one(self.get_pool()).await?;

        Ok(count)
    }

    // Client operations
    pub async fn get_client(&self, id: i64) -> sqlx::Result<Option<Client>> {
        let sql = format!("{} WHERE c.id = $1", query::CLIENT_SELECT);
        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(id)
            .fetch_optional(self.get_pool())
            .await?;

        Ok(row.map(Client::from))
    }

    pub async fn insert_client(&self, client: &ClientFields) -> sqlx::Result<i64> {
        let mut tx = self.pool.begin().await?;
        let id = insert_client(&mut tx, client).await?;
        tx.commit().await?;

        Ok(id)
    }

    /// Insert several clients in one transaction, returning their ids in order.
    pub async fn insert_clients(&self, clients: &[ClientFields]) -> sqlx::Result<Vec<i64>> {
        let mut tx = self.pool.begin().await?;

        let mut ids = Vec::with_capacity(clients.len());
        for client in clients {
            ids.push(insert_client(&mut tx, client).await?);
        }

        tx.commit().await?;

        Ok(ids)
    }

    /// Overwrite the mutable fields of client `id`. Returns `false` when no
    /// such client exists, in which case nothing is written.
    pub async fn update_client(&self, id: i64, client: &ClientFields) -> sqlx::Result<bool> {
        // Start a transaction
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT address_id FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing_address_id) = existing else {
            return Ok(false);
        };

        sqlx::query(
            r#"
            UPDATE clients
            SET first_name = $1, last_name = $2, email = $3, phone = $4, description = $5
            WHERE id = $6
            "#,
        )
        .bind(client.first_name.clone())
        .bind(client.last_name.clone())
        .bind(client.email.clone())
        .bind(client.phone.clone())
        .bind(client.description.clone())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(address) = &client.address {
            match existing_address_id {
                Some(address_id) => {
                    write_address(&mut tx, address_id, address).await?;
                }
                None => {
                    let address_id = insert_address(&mut tx, address).await?;
                    sqlx::query("UPDATE clients SET address_id = $1 WHERE id = $2")
                        .bind(address_id)
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }

        // Commit the transaction
        tx.commit().await?;

        Ok(true)
    }

    /// Delete client `id` and its address. Returns `false` when no such
    /// client exists.
    pub async fn delete_client(&self, id: i64) -> sqlx::Result<bool> {
        // Start a transaction
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT address_id FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(address_id) = existing else {
            return Ok(false);
        };

        // The client references the address, so it goes first
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if let Some(address_id) = address_id {
            sqlx::query("DELETE FROM addresses WHERE id = $1")
                .bind(address_id)
                .execute(&mut *tx)
                .await?;
        }

        // Commit the transaction
        tx.commit().await?;

        Ok(true)
    }

    // Address operations
    pub async fn get_address(&self, id: i64) -> sqlx::Result<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(
            "SELECT id, street_address, city, state, zip FROM addresses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(address)
    }

    /// Overwrite address `id` in place. Returns `false` when no such address
    /// exists.
    pub async fn update_address(&self, id: i64, address: &AddressFields) -> sqlx::Result<bool> {
        let mut tx = self.pool.begin().await?;
        let updated = write_address(&mut tx, id, address).await?;
        tx.commit().await?;

        Ok(updated)
    }
}

async fn insert_client(
    tx: &mut sqlx::Transaction<'_, sqlx::Any>,
    client: &ClientFields,
) -> sqlx::Result<i64> {
    let address_id = match &client.address {
        Some(address) => Some(insert_address(tx, address).await?),
        None => None,
    };

    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO clients (first_name, last_name, email, phone, description, address_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(client.first_name.clone())
    .bind(client.last_name.clone())
    .bind(client.email.clone())
    .bind(client.phone.clone())
    .bind(client.description.clone())
    .bind(address_id)
    .fetch_one(&mut **tx)
    .await
}

async fn insert_address(
    tx: &mut sqlx::Transaction<'_, sqlx::Any>,
    address: &AddressFields,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO addresses (street_address, city, state, zip)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(address.street_address.clone())
    .bind(address.city.clone())
    .bind(address.state.clone())
    .bind(address.zip.clone())
    .fetch_one(&mut **tx)
    .await
}

async fn write_address(
    tx: &mut sqlx::Transaction<'_, sqlx::Any>,
    id: i64,
    address: &AddressFields,
) -> sqlx::Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE addresses
        SET street_address = $1, city = $2, state = $3, zip = $4
        WHERE id = $5
        "#,
    )
    .bind(address.street_address.clone())
    .bind(address.city.clone())
    .bind(address.state.clone())
    .bind(address.zip.clone())
    .bind(id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Initialize the database connection pool and make sure the schema exists
pub async fn init(config: &Config) -> sqlx::Result<Database> {
    let db = Database::new(config).await?;

    db.ensure_schema().await?;
    tracing::info!(backend = ?db.backend(), "database ready");

    Ok(db)
}

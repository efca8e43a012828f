use crate::models::{Admin, ContactMessage, Payment, Reservation, Review, User};
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// Handle to the portal database. Each form has its own collection and the
/// collections never reference each other.
#[derive(Clone)]
pub struct CareDb {
    client: MongoClient,
    db: Database,
}

impl CareDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for care-service");

        // Email lookups back login, logout and the signup duplicate check.
        // Not unique: uniqueness is checked by the handlers, not enforced.
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name("email_lookup".to_string())
                    .build(),
            )
            .build();

        self.users()
            .create_index(email_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create email index on users collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on users.email");

        let newest_first_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.reviews()
            .create_index(newest_first_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create created_at index on reviews collection: {}",
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created index on reviews.created_at");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    /// Loads a whole collection in the given sort order.
    pub async fn find_all<T>(
        &self,
        collection: &Collection<T>,
        sort: Document,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        let options = FindOptions::builder().sort(sort).build();
        let cursor = collection.find(None, options).await.map_err(|e| {
            tracing::error!(
                collection = %collection.name(),
                "Failed to query collection: {}",
                e
            );
            AppError::from(e)
        })?;

        cursor.try_collect().await.map_err(AppError::from)
    }

    pub fn reviews(&self) -> Collection<Review> {
        self.db.collection("reviews")
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    pub fn payments(&self) -> Collection<Payment> {
        self.db.collection("payments")
    }

    pub fn reservations(&self) -> Collection<Reservation> {
        self.db.collection("reservations")
    }

    pub fn contacts(&self) -> Collection<ContactMessage> {
        self.db.collection("contacts")
    }

    pub fn admins(&self) -> Collection<Admin> {
        self.db.collection("admins")
    }

    /// Info records are schema-less.
    pub fn infos(&self) -> Collection<Document> {
        self.db.collection("infos")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use futures::TryStreamExt;
use lostfound_result::{Error, Result};
use mongodb::bson::{doc, to_document, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{
    ClientOptions, FindOneAndUpdateOptions, FindOneOptions, FindOptions, IndexOptions,
    UpdateModifications,
};
use mongodb::results::UpdateResult;
use mongodb::{Client, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::OnceCell;

/// Server error code for unique index violations
const DUPLICATE_KEY: i32 = 11000;

database_derived!(
    /// MongoDB implementation
    ///
    /// The client is created on first use and shared by every clone of this
    /// handle. Concurrent first callers wait on the same setup.
    pub struct MongoDb {
        uri: String,
        database_name: String,
        query_timeout: Duration,
        connect_timeout: Duration,
        client: Arc<OnceCell<Client>>,
    }
);

impl MongoDb {
    /// Create a handle without touching the network
    pub fn new(
        uri: String,
        database_name: String,
        query_timeout: Duration,
        connect_timeout: Duration,
    ) -> MongoDb {
        MongoDb {
            uri,
            database_name,
            query_timeout,
            connect_timeout,
            client: Arc::new(OnceCell::new()),
        }
    }

    /// Get the shared client, setting it up if nobody has yet
    ///
    /// A failed setup leaves the cell empty so the next caller retries.
    pub async fn client(&self) -> Result<&Client> {
        self.client.get_or_try_init(|| self.setup()).await
    }

    async fn setup(&self) -> Result<Client> {
        info!("Connecting to MongoDB database `{}`", self.database_name);

        let unavailable = || {
            create_error!(ServiceUnavailable {
                service: "database".to_string()
            })
        };

        let setup = async {
            let mut options = ClientOptions::parse(&self.uri).await.map_err(|err| {
                error!("Invalid MongoDB connection string: {err}");
                unavailable()
            })?;

            options.app_name = Some("lostfound".to_string());
            options.connect_timeout = Some(self.connect_timeout);
            options.server_selection_timeout = Some(self.connect_timeout);

            let client = Client::with_options(options).map_err(|err| {
                error!("Failed to create MongoDB client: {err}");
                unavailable()
            })?;

            self.create_indexes(&client).await?;
            Ok(client)
        };

        match tokio::time::timeout(self.connect_timeout * 2, setup).await {
            Ok(result) => result,
            Err(_) => {
                error!("Timed out while connecting to MongoDB");
                Err(unavailable())
            }
        }
    }

    async fn create_indexes(&self, client: &Client) -> Result<()> {
        let db = client.database(&self.database_name);
        let unique = || IndexOptions::builder().unique(true).build();

        let indexes: [(&'static str, Vec<IndexModel>); 7] = [
            (
                "posts",
                vec![
                    IndexModel::builder()
                        .keys(doc! { "createdAt": -1, "_id": -1 })
                        .build(),
                    IndexModel::builder().keys(doc! { "user_id": 1 }).build(),
                    IndexModel::builder().keys(doc! { "repost": 1 }).build(),
                ],
            ),
            (
                "likes",
                vec![IndexModel::builder()
                    .keys(doc! { "postId": 1 })
                    .options(unique())
                    .build()],
            ),
            (
                "comments",
                vec![IndexModel::builder()
                    .keys(doc! { "postId": 1, "createdAt": -1 })
                    .build()],
            ),
            (
                "reports",
                vec![IndexModel::builder()
                    .keys(doc! { "type": 1, "id": 1 })
                    .options(unique())
                    .build()],
            ),
            (
                "users",
                vec![IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique())
                    .build()],
            ),
            (
                "statuses",
                vec![
                    // One status per user, expired ones are cleared before insert
                    IndexModel::builder()
                        .keys(doc! { "userId": 1 })
                        .options(unique())
                        .build(),
                    IndexModel::builder()
                        .keys(doc! { "expiresAt": 1 })
                        .options(
                            IndexOptions::builder()
                                .expire_after(Duration::from_secs(0))
                                .build(),
                        )
                        .build(),
                ],
            ),
            (
                "messages",
                vec![IndexModel::builder()
                    .keys(doc! { "from": 1, "to": 1, "timestamp": -1 })
                    .build()],
            ),
        ];

        for (collection, models) in indexes {
            db.collection::<Document>(collection)
                .create_indexes(models)
                .await
                .map_err(|err| classify(err, "create_indexes", collection))?;
        }

        Ok(())
    }

    /// Get the configured database
    pub async fn db(&self) -> Result<mongodb::Database> {
        Ok(self.client().await?.database(&self.database_name))
    }

    /// Get a collection by its name
    pub async fn col<T: Send + Sync>(&self, collection: &str) -> Result<mongodb::Collection<T>> {
        Ok(self.db().await?.collection(collection))
    }

    /// Run a driver future under the query timeout
    pub async fn timed<T, F>(
        &self,
        operation: &'static str,
        collection: &'static str,
        future: F,
    ) -> Result<T>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.query_timeout, future).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(classify(err, operation, collection)),
            Err(_) => {
                warn!("{operation} on `{collection}` timed out");
                Err(create_error!(ServiceUnavailable {
                    service: "database".to_string()
                }))
            }
        }
    }

    /// Insert one document into a collection
    pub async fn insert_one<T: Serialize + Send + Sync>(
        &self,
        collection: &'static str,
        document: &T,
    ) -> Result<()> {
        let col = self.col::<T>(collection).await?;
        self.timed("insert_one", collection, col.insert_one(document))
            .await
            .map(|_| ())
    }

    /// Count documents by filter
    pub async fn count_documents(&self, collection: &'static str, filter: Document) -> Result<u64> {
        let col = self.col::<Document>(collection).await?;
        self.timed("count_documents", collection, col.count_documents(filter))
            .await
    }

    /// Find multiple documents in a collection with options
    pub async fn find_with_options<O, T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        collection: &'static str,
        filter: Document,
        options: O,
    ) -> Result<Vec<T>>
    where
        O: Into<Option<FindOptions>>,
    {
        let col = self.col::<T>(collection).await?;
        let options = options.into();
        self.timed("find", collection, async move {
            col.find(filter)
                .with_options(options)
                .await?
                .try_collect::<Vec<T>>()
                .await
        })
        .await
    }

    /// Find multiple documents in a collection
    pub async fn find<T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        collection: &'static str,
        filter: Document,
    ) -> Result<Vec<T>> {
        self.find_with_options(collection, filter, None).await
    }

    /// Find one document with options
    pub async fn find_one_with_options<O, T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        collection: &'static str,
        filter: Document,
        options: O,
    ) -> Result<Option<T>>
    where
        O: Into<Option<FindOneOptions>>,
    {
        let col = self.col::<T>(collection).await?;
        let options = options.into();
        self.timed("find_one", collection, async move {
            col.find_one(filter).with_options(options).await
        })
        .await
    }

    /// Find one document
    pub async fn find_one<T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        collection: &'static str,
        filter: Document,
    ) -> Result<Option<T>> {
        self.find_one_with_options(collection, filter, None).await
    }

    /// Find one document by its ID
    pub async fn find_one_by_id<T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        collection: &'static str,
        id: &str,
    ) -> Result<Option<T>> {
        self.find_one(collection, doc! { "_id": id }).await
    }

    /// Apply an update document to the first match
    pub async fn update_one(
        &self,
        collection: &'static str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateResult> {
        let col = self.col::<Document>(collection).await?;
        self.timed("update_one", collection, col.update_one(filter, update))
            .await
    }

    /// Set the non-null fields of a partial document on the given ID
    pub async fn update_one_by_id<T: Serialize>(
        &self,
        collection: &'static str,
        id: &str,
        partial: &T,
    ) -> Result<UpdateResult> {
        let set = to_document(partial).map_err(|_| create_error!(InternalError))?;
        self.update_one(collection, doc! { "_id": id }, doc! { "$set": set })
            .await
    }

    /// Atomically update one document and return it
    pub async fn find_one_and_update<T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        collection: &'static str,
        filter: Document,
        update: impl Into<UpdateModifications>,
        options: FindOneAndUpdateOptions,
    ) -> Result<Option<T>> {
        let col = self.col::<T>(collection).await?;
        let update = update.into();
        self.timed("find_one_and_update", collection, async move {
            col.find_one_and_update(filter, update)
                .with_options(options)
                .await
        })
        .await
    }

    /// Delete one document by the given filter
    pub async fn delete_one(&self, collection: &'static str, filter: Document) -> Result<u64> {
        let col = self.col::<Document>(collection).await?;
        self.timed("delete_one", collection, col.delete_one(filter))
            .await
            .map(|result| result.deleted_count)
    }

    /// Delete one document by the given ID
    pub async fn delete_one_by_id(&self, collection: &'static str, id: &str) -> Result<u64> {
        self.delete_one(collection, doc! { "_id": id }).await
    }

    /// Delete every document matching the filter
    pub async fn delete_many(&self, collection: &'static str, filter: Document) -> Result<u64> {
        let col = self.col::<Document>(collection).await?;
        self.timed("delete_many", collection, col.delete_many(filter))
            .await
            .map(|result| result.deleted_count)
    }

    /// Run an aggregation pipeline
    pub async fn aggregate(
        &self,
        collection: &'static str,
        pipeline: Vec<Document>,
    ) -> Result<Vec<Document>> {
        let col = self.col::<Document>(collection).await?;
        self.timed("aggregate", collection, async move {
            col.aggregate(pipeline).await?.try_collect::<Vec<_>>().await
        })
        .await
    }

    /// Drop the whole database
    pub async fn drop(&self) -> Result<()> {
        let db = self.db().await?;
        self.timed("drop", "*", db.drop()).await
    }
}

/// Map a driver error onto the error taxonomy
fn classify(err: mongodb::error::Error, operation: &str, collection: &'static str) -> Error {
    match *err.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => {
            error!("{operation} on `{collection}` could not reach MongoDB: {err}");
            create_error!(ServiceUnavailable {
                service: "database".to_string()
            })
        }
        ErrorKind::Write(WriteFailure::WriteError(ref write)) if write.code == DUPLICATE_KEY => {
            create_error!(DuplicateEntry {
                collection: collection.to_string()
            })
        }
        ErrorKind::Command(ref command) if command.code == DUPLICATE_KEY => {
            create_error!(DuplicateEntry {
                collection: collection.to_string()
            })
        }
        _ => {
            error!("{operation} on `{collection}` failed: {err}");
            create_database_error!(operation, collection)
        }
    }
}

/// Just a string ID struct
#[derive(Deserialize)]
pub struct DocumentId {
    #[serde(rename = "_id")]
    pub id: String,
}

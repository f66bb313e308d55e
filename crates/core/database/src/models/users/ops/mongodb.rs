use bson::Document;
use lostfound_result::Result;
use ::mongodb::options::FindOptions;

use crate::search::Candidate;
use crate::MongoDb;
use crate::User;

use super::AbstractUsers;

static COL: &str = "users";

#[async_trait]
impl AbstractUsers for MongoDb {
    /// Insert a new user into the database
    async fn insert_user(&self, user: &User) -> Result<()> {
        self.insert_one(COL, user).await
    }

    /// Fetch a user from the database
    async fn fetch_user(&self, id: &str) -> Result<User> {
        self.find_one_by_id(COL, id)
            .await?
            .ok_or_else(|| create_error!(UnknownUser))
    }

    /// Fetch many users, missing ids are skipped
    async fn fetch_users(&self, ids: &[String]) -> Result<Vec<User>> {
        self.find(
            COL,
            doc! {
                "_id": {
                    "$in": ids
                }
            },
        )
        .await
    }

    /// Fetch the id and name of every user, ordered by id
    async fn fetch_user_names(&self) -> Result<Vec<Candidate>> {
        let documents: Vec<Document> = self
            .find_with_options(
                COL,
                doc! {},
                FindOptions::builder()
                    .projection(doc! { "_id": 1, "name": 1 })
                    .sort(doc! { "_id": 1 })
                    .build(),
            )
            .await?;

        Ok(documents
            .iter()
            .filter_map(|document| {
                Some(Candidate::new(
                    document.get_str("_id").ok()?,
                    document.get_str("name").unwrap_or_default(),
                ))
            })
            .collect())
    }
}

use lostfound_result::Result;

use crate::search::Candidate;
use crate::User;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractUsers: Sync + Send {
    /// Insert a new user into the database
    async fn insert_user(&self, user: &User) -> Result<()>;

    /// Fetch a user from the database
    async fn fetch_user(&self, id: &str) -> Result<User>;

    /// Fetch many users, missing ids are skipped
    async fn fetch_users(&self, ids: &[String]) -> Result<Vec<User>>;

    /// Fetch the id and name of every user, ordered by id
    async fn fetch_user_names(&self) -> Result<Vec<Candidate>>;
}

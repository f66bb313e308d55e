use lostfound_result::Result;

use crate::search::Candidate;
use crate::ReferenceDb;
use crate::User;

use super::AbstractUsers;

#[async_trait]
impl AbstractUsers for ReferenceDb {
    /// Insert a new user into the database
    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.lock().await;
        if users.contains_key(&user.id) || users.values().any(|u| u.email == user.email) {
            Err(create_error!(DuplicateEntry {
                collection: "users".to_string()
            }))
        } else {
            users.insert(user.id.to_string(), user.clone());
            Ok(())
        }
    }

    /// Fetch a user from the database
    async fn fetch_user(&self, id: &str) -> Result<User> {
        let users = self.users.lock().await;
        users
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(UnknownUser))
    }

    /// Fetch many users, missing ids are skipped
    async fn fetch_users(&self, ids: &[String]) -> Result<Vec<User>> {
        let users = self.users.lock().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    /// Fetch the id and name of every user, ordered by id
    async fn fetch_user_names(&self) -> Result<Vec<Candidate>> {
        let users = self.users.lock().await;
        let mut candidates: Vec<Candidate> = users
            .values()
            .map(|user| Candidate::new(&user.id, &user.name))
            .collect();

        candidates.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(candidates)
    }
}

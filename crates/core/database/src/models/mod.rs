mod comments;
mod likes;
mod messages;
mod posts;
mod reports;
mod statuses;
mod users;

pub use comments::*;
pub use likes::*;
pub use messages::*;
pub use posts::*;
pub use reports::*;
pub use statuses::*;
pub use users::*;

#[cfg(feature = "mongodb")]
use crate::MongoDb;
use crate::{feed::AbstractFeed, Database, ReferenceDb};

pub trait AbstractDatabase:
    Sync
    + Send
    + comments::AbstractComments
    + likes::AbstractLikes
    + messages::AbstractMessages
    + posts::AbstractPosts
    + reports::AbstractReports
    + statuses::AbstractStatuses
    + users::AbstractUsers
    + AbstractFeed
{
}

impl AbstractDatabase for ReferenceDb {}

#[cfg(feature = "mongodb")]
impl AbstractDatabase for MongoDb {}

impl std::ops::Deref for Database {
    type Target = dyn AbstractDatabase;

    fn deref(&self) -> &Self::Target {
        match &self {
            Database::Reference(dummy) => dummy,
            #[cfg(feature = "mongodb")]
            Database::MongoDb(mongo) => mongo,
        }
    }
}

use ::mongodb::options::FindOptions;
use lostfound_result::Result;

use crate::Message;
use crate::MongoDb;

use super::AbstractMessages;

static COL: &str = "messages";

fn newest_first() -> FindOptions {
    FindOptions::builder()
        .sort(doc! { "timestamp": -1, "_id": -1 })
        .build()
}

#[async_trait]
impl AbstractMessages for MongoDb {
    async fn insert_message(&self, message: &Message) -> Result<()> {
        self.insert_one(COL, message).await
    }

    async fn fetch_messages_for_user(&self, user_id: &str) -> Result<Vec<Message>> {
        self.find_with_options(
            COL,
            doc! { "$or": [ { "from": user_id }, { "to": user_id } ] },
            newest_first(),
        )
        .await
    }

    async fn fetch_messages_between(&self, a: &str, b: &str) -> Result<Vec<Message>> {
        self.find_with_options(
            COL,
            doc! {
                "$or": [
                    { "from": a, "to": b },
                    { "from": b, "to": a },
                ]
            },
            newest_first(),
        )
        .await
    }
}

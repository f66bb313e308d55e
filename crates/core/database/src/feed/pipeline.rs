use bson::{doc, Bson, Document};

use super::{FeedQuery, FeedSelector};

/// Aggregation over `posts` that selects and enriches a feed in one round trip
///
/// The author is joined with an inclusion projection so private user fields
/// can never leak into a feed.
pub fn feed_pipeline(query: &FeedQuery) -> Vec<Document> {
    let mut pipeline = vec![];

    match &query.selector {
        FeedSelector::ById(id) => pipeline.push(doc! { "$match": { "_id": id.clone() } }),
        FeedSelector::All => {}
        FeedSelector::ByAuthor(user_id) => {
            pipeline.push(doc! { "$match": { "user_id": user_id.clone() } })
        }
        FeedSelector::RepostedBy(user_id) => {
            pipeline.push(doc! { "$match": { "repost": user_id.clone() } })
        }
        FeedSelector::ByIds(ids) => {
            pipeline.push(doc! { "$match": { "_id": { "$in": ids.clone() } } });
            pipeline.push(doc! {
                "$addFields": { "rank": { "$indexOfArray": [ ids.clone(), "$_id" ] } }
            });
        }
    }

    match &query.selector {
        FeedSelector::ByIds(_) => pipeline.push(doc! { "$sort": { "rank": 1 } }),
        FeedSelector::ById(_) => {}
        _ => pipeline.push(doc! { "$sort": { "createdAt": -1, "_id": -1 } }),
    }

    if let Some(pagination) = query.pagination {
        pipeline.push(doc! { "$skip": pagination.skip() });
        pipeline.push(doc! { "$limit": pagination.limit });
    }

    pipeline.push(doc! {
        "$lookup": {
            "from": "users",
            "let": { "author": "$user_id" },
            "pipeline": [
                { "$match": { "$expr": { "$eq": [ "$_id", "$$author" ] } } },
                { "$project": { "_id": 1, "name": 1, "avatar": 1 } },
            ],
            "as": "user",
        }
    });

    pipeline.push(doc! {
        "$lookup": {
            "from": "likes",
            "let": { "post": "$_id" },
            "pipeline": [
                { "$match": { "$expr": { "$eq": [ "$postId", "$$post" ] } } },
                { "$project": { "_id": 0, "usersIDs": 1 } },
            ],
            "as": "likes",
        }
    });

    pipeline.push(doc! {
        "$lookup": {
            "from": "comments",
            "let": { "post": "$_id" },
            "pipeline": [
                { "$match": { "$expr": { "$eq": [ "$postId", "$$post" ] } } },
                { "$count": "count" },
            ],
            "as": "commentsCount",
        }
    });

    let recent_comments: Bson = if query.recent_comments > 0 {
        pipeline.push(doc! {
            "$lookup": {
                "from": "comments",
                "let": { "post": "$_id" },
                "pipeline": [
                    { "$match": { "$expr": { "$eq": [ "$postId", "$$post" ] } } },
                    { "$sort": { "createdAt": -1, "_id": -1 } },
                    { "$limit": query.recent_comments },
                ],
                "as": "recentComments",
            }
        });

        Bson::String("$recentComments".to_string())
    } else {
        doc! { "$literal": [] }.into()
    };

    pipeline.push(doc! {
        "$addFields": {
            "user": { "$arrayElemAt": [ "$user", 0 ] },
            "likers": {
                "$reduce": {
                    "input": "$likes",
                    "initialValue": [],
                    "in": { "$setUnion": [ "$$value", { "$ifNull": [ "$$this.usersIDs", [] ] } ] },
                }
            },
            "commentsCount": { "$ifNull": [ { "$arrayElemAt": [ "$commentsCount.count", 0 ] }, 0 ] },
            "recentComments": recent_comments,
            "repostsCount": { "$size": { "$ifNull": [ "$repost", [] ] } },
        }
    });

    pipeline.push(doc! {
        "$addFields": {
            "likesCount": { "$size": "$likers" },
            "isLiked": { "$in": [ query.requester.clone(), "$likers" ] },
        }
    });

    pipeline.push(doc! { "$project": { "likes": 0, "likers": 0, "rank": 0 } });
    pipeline
}

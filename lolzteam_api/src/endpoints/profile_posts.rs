use serde_json::{json, Value};

use super::UserRef;
use crate::{api::Api, route::Params, Error};

endpoint_group!(
    /// `/profile-posts` and user timelines
    ProfilePosts
);

impl<'a, A: Api + ?Sized> ProfilePosts<'a, A> {
    pub async fn comments(
        &self,
        profile_post_id: u64,
        before: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Value, Error> {
        let params = Params::new().with("before", before).with("limit", limit);
        self.api
            .get(&format!("/profile-posts/{}/comments", profile_post_id), params)
            .await
    }

    pub async fn comment(&self, profile_post_id: u64, comment_id: u64) -> Result<Value, Error> {
        self.api
            .get(
                &format!("/profile-posts/{}/comments/{}", profile_post_id, comment_id),
                Params::new(),
            )
            .await
    }

    pub async fn create_comment(
        &self,
        profile_post_id: u64,
        comment_body: &str,
    ) -> Result<Value, Error> {
        self.api
            .post(
                &format!("/profile-posts/{}/comments", profile_post_id),
                Params::new(),
                Some(json!({ "comment_body": comment_body })),
            )
            .await
    }

    /// Profile posts on a user's timeline.
    pub async fn list(
        &self,
        user: impl Into<UserRef>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .get(
                &format!("/users/{}/timeline", user),
                Params::new().with("page", page).with("limit", limit),
            )
            .await
    }

    pub async fn get(&self, profile_post_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/profile-posts/{}", profile_post_id), Params::new())
            .await
    }

    /// Posts on `user`'s timeline.
    pub async fn create(&self, user: impl Into<UserRef>, post_body: &str) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .post(
                "/profile-posts",
                Params::new().with("user_id", user),
                Some(json!({ "post_body": post_body })),
            )
            .await
    }

    pub async fn edit(&self, profile_post_id: u64, post_body: &str) -> Result<Value, Error> {
        self.api
            .put(
                &format!("/profile-posts/{}", profile_post_id),
                Params::new(),
                Some(json!({ "post_body": post_body })),
            )
            .await
    }

    pub async fn delete(&self, profile_post_id: u64, reason: Option<&str>) -> Result<Value, Error> {
        self.api
            .delete(
                &format!("/profile-posts/{}", profile_post_id),
                Params::new().with("reason", reason),
            )
            .await
    }

    pub async fn likes(&self, profile_post_id: u64) -> Result<Value, Error> {
        self.api
            .get(
                &format!("/profile-posts/{}/likes", profile_post_id),
                Params::new(),
            )
            .await
    }

    pub async fn like(&self, profile_post_id: u64) -> Result<Value, Error> {
        self.api
            .post(
                &format!("/profile-posts/{}/likes", profile_post_id),
                Params::new(),
                None,
            )
            .await
    }

    pub async fn unlike(&self, profile_post_id: u64) -> Result<Value, Error> {
        self.api
            .delete(
                &format!("/profile-posts/{}/likes", profile_post_id),
                Params::new(),
            )
            .await
    }

    pub async fn report(&self, profile_post_id: u64, message: &str) -> Result<Value, Error> {
        self.api
            .post(
                &format!("/profile-posts/{}/report", profile_post_id),
                Params::new().with("message", message),
                None,
            )
            .await
    }
}

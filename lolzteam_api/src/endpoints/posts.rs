use serde_json::{json, Value};

use super::PostOrder;
use crate::{api::Api, route::Params, Error};

endpoint_group!(
    /// `/posts`
    Posts
);

/// Paging and ordering for [`Posts::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostListQuery {
    /// Jump to the page containing this post.
    pub page_of_post_id: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub order: Option<PostOrder>,
}

impl PostListQuery {
    pub fn with_page_of_post_id(mut self, post_id: u64) -> Self {
        self.page_of_post_id = Some(post_id);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order(mut self, order: PostOrder) -> Self {
        self.order = Some(order);
        self
    }
}

impl<'a, A: Api + ?Sized> Posts<'a, A> {
    /// Comments on a post, optionally only those older than a timestamp or
    /// a given comment.
    pub async fn comments(
        &self,
        post_id: u64,
        before: Option<i64>,
        before_comment: Option<u64>,
    ) -> Result<Value, Error> {
        let params = Params::new()
            .with("before", before)
            .with("before_comment", before_comment);
        self.api
            .get(&format!("/posts/{}/comments", post_id), params)
            .await
    }

    pub async fn create_comment(&self, post_id: u64, comment_body: &str) -> Result<Value, Error> {
        self.api
            .post(
                &format!("/posts/{}/comments", post_id),
                Params::new(),
                Some(json!({ "comment_body": comment_body })),
            )
            .await
    }

    /// Posts of a thread.
    pub async fn list(&self, thread_id: u64, query: &PostListQuery) -> Result<Value, Error> {
        let params = Params::new()
            .with("thread_id", thread_id)
            .with("page_of_post_id", query.page_of_post_id)
            .with("page", query.page)
            .with("limit", query.limit)
            .with("order", query.order);
        self.api.get("/posts", params).await
    }

    pub async fn get(&self, post_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/posts/{}", post_id), Params::new())
            .await
    }

    /// Replies in a thread, optionally quoting another post.
    pub async fn create(
        &self,
        thread_id: u64,
        post_body: &str,
        quote_post_id: Option<u64>,
    ) -> Result<Value, Error> {
        let params = Params::new()
            .with("thread_id", thread_id)
            .with("quote_post_id", quote_post_id);
        self.api
            .post("/posts", params, Some(json!({ "post_body": post_body })))
            .await
    }

    pub async fn edit(&self, post_id: u64, post_body: &str) -> Result<Value, Error> {
        self.api
            .put(
                &format!("/posts/{}", post_id),
                Params::new(),
                Some(json!({ "post_body": post_body })),
            )
            .await
    }

    pub async fn delete(&self, post_id: u64, reason: Option<&str>) -> Result<Value, Error> {
        self.api
            .delete(
                &format!("/posts/{}", post_id),
                Params::new().with("reason", reason),
            )
            .await
    }

    pub async fn likes(
        &self,
        post_id: u64,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Value, Error> {
        let params = Params::new().with("page", page).with("limit", limit);
        self.api
            .get(&format!("/posts/{}/likes", post_id), params)
            .await
    }

    pub async fn like(&self, post_id: u64) -> Result<Value, Error> {
        self.api
            .post(&format!("/posts/{}/likes", post_id), Params::new(), None)
            .await
    }

    pub async fn unlike(&self, post_id: u64) -> Result<Value, Error> {
        self.api
            .delete(&format!("/posts/{}/likes", post_id), Params::new())
            .await
    }

    pub async fn report(&self, post_id: u64, message: &str) -> Result<Value, Error> {
        self.api
            .post(
                &format!("/posts/{}/report", post_id),
                Params::new().with("message", message),
                None,
            )
            .await
    }
}

//! Full-text and tag search. Every search is a POST with query parameters.

use serde_json::Value;

use crate::{
    api::Api,
    route::{ListStyle, Params},
    Error,
};

endpoint_group!(
    /// `/search`
    Search
);

/// Search terms shared by the search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub tag: Option<String>,
    pub forum_id: Option<u64>,
    pub user_id: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Number of results with full data; only thread and post searches
    /// read it.
    pub date_limit: Option<u32>,
}

impl SearchQuery {
    pub fn new(q: &str) -> Self {
        Self {
            q: q.to_string(),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn with_forum_id(mut self, forum_id: u64) -> Self {
        self.forum_id = Some(forum_id);
        self
    }

    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
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

    pub fn with_date_limit(mut self, date_limit: u32) -> Self {
        self.date_limit = Some(date_limit);
        self
    }

    fn base_params(&self) -> Params {
        Params::new()
            .with("q", &self.q)
            .with("tag", self.tag.as_deref())
            .with("forum_id", self.forum_id)
            .with("user_id", self.user_id)
            .with("page", self.page)
            .with("limit", self.limit)
    }

    fn dated_params(&self) -> Params {
        self.base_params().with("date_limit", self.date_limit)
    }
}

impl<'a, A: Api + ?Sized> Search<'a, A> {
    /// Searches threads, posts and profile posts at once.
    pub async fn all(&self, query: &SearchQuery) -> Result<Value, Error> {
        self.api.post("/search", query.base_params(), None).await
    }

    pub async fn threads(&self, query: &SearchQuery) -> Result<Value, Error> {
        self.api
            .post("/search/threads", query.dated_params(), None)
            .await
    }

    pub async fn posts(&self, query: &SearchQuery) -> Result<Value, Error> {
        self.api
            .post("/search/posts", query.dated_params(), None)
            .await
    }

    /// Profile posts only match on text and author.
    pub async fn profile_posts(&self, query: &SearchQuery) -> Result<Value, Error> {
        let params = Params::new()
            .with("q", &query.q)
            .with("user_id", query.user_id)
            .with("page", query.page)
            .with("limit", query.limit);
        self.api.post("/search/profile-posts", params, None).await
    }

    /// Content tagged with `tag` and, optionally, all of `tags`.
    pub async fn tagged(
        &self,
        tag: &str,
        tags: &[&str],
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Value, Error> {
        let params = Params::new()
            .with("tag", tag)
            .with_list("tags", tags, ListStyle::Brackets)
            .with("page", page)
            .with("limit", limit);
        self.api.post("/search/tagged", params, None).await
    }
}

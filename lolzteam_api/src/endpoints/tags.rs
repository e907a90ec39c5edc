use serde_json::Value;

use crate::{api::Api, route::Params, Error};

endpoint_group!(
    /// `/tags`
    Tags
);

impl<'a, A: Api + ?Sized> Tags<'a, A> {
    pub async fn popular(&self) -> Result<Value, Error> {
        self.api.get("/tags", Params::new()).await
    }

    pub async fn list(&self, page: Option<u32>, limit: Option<u32>) -> Result<Value, Error> {
        self.api
            .get(
                "/tags/list",
                Params::new().with("page", page).with("limit", limit),
            )
            .await
    }

    /// Content carrying the tag.
    pub async fn tagged(
        &self,
        tag_id: u64,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Value, Error> {
        self.api
            .get(
                &format!("/tags/{}", tag_id),
                Params::new().with("page", page).with("limit", limit),
            )
            .await
    }

    /// Tags matching a text filter.
    pub async fn find(&self, tag: &str) -> Result<Value, Error> {
        self.api
            .get("/tags/find", Params::new().with("tag", tag))
            .await
    }
}

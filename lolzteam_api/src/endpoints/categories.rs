use serde_json::Value;

use super::Order;
use crate::{api::Api, route::Params, Error};

endpoint_group!(
    /// `/categories`
    Categories
);

impl<'a, A: Api + ?Sized> Categories<'a, A> {
    /// Lists categories, optionally only the direct children of a category
    /// or forum.
    pub async fn list(
        &self,
        parent_category_id: Option<u64>,
        parent_forum_id: Option<u64>,
        order: Option<Order>,
    ) -> Result<Value, Error> {
        let params = Params::new()
            .with("parent_category_id", parent_category_id)
            .with("parent_forum_id", parent_forum_id)
            .with("order", order);
        self.api.get("/categories", params).await
    }

    pub async fn get(&self, category_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/categories/{}", category_id), Params::new())
            .await
    }
}

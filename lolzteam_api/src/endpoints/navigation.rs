use serde_json::Value;

use crate::{api::Api, route::Params, Error};

endpoint_group!(
    /// `/navigation`
    Navigation
);

impl<'a, A: Api + ?Sized> Navigation<'a, A> {
    /// Navigation elements, optionally below a parent node.
    pub async fn get(&self, parent: Option<u64>) -> Result<Value, Error> {
        self.api
            .get("/navigation", Params::new().with("parent", parent))
            .await
    }
}

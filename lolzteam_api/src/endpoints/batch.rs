use serde_json::Value;

use crate::{api::Api, route::Params, Error};

endpoint_group!(
    /// `/batch`
    Batch
);

impl<'a, A: Api + ?Sized> Batch<'a, A> {
    /// Runs several API calls in one request. `jobs` is the JSON array of
    /// job descriptions, each with an `id`, `uri`, `method` and `params`.
    pub async fn execute(&self, jobs: Value) -> Result<Value, Error> {
        self.api.post("/batch", Params::new(), Some(jobs)).await
    }
}

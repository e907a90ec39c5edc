//! The capability every endpoint group is written against.

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    route::{Files, Params, Route},
    Error,
};

/// Something that can dispatch a [`Route`] and return its JSON body.
///
/// [`Client`](crate::Client) is the production implementation; endpoint
/// groups only ever see this trait, so tests can substitute a recorder.
/// The `get`/`post`/`put`/`delete` helpers just build a route and hand it to
/// [`request`](Api::request).
#[async_trait]
pub trait Api: Send + Sync {
    async fn request(&self, route: Route) -> Result<Value, Error>;

    async fn get(&self, path: &str, params: Params) -> Result<Value, Error> {
        self.request(Route::get(path).with_params(params)).await
    }

    async fn post(&self, path: &str, params: Params, data: Option<Value>) -> Result<Value, Error> {
        let route = Route::post(path).with_params(params);
        let route = match data {
            Some(data) => route.with_data(data),
            None => route,
        };
        self.request(route).await
    }

    async fn post_files(
        &self,
        path: &str,
        params: Params,
        files: Files,
        data: Option<Value>,
    ) -> Result<Value, Error> {
        let route = Route::post(path).with_params(params).with_files(files);
        let route = match data {
            Some(data) => route.with_data(data),
            None => route,
        };
        self.request(route).await
    }

    async fn put(&self, path: &str, params: Params, data: Option<Value>) -> Result<Value, Error> {
        let route = Route::put(path).with_params(params);
        let route = match data {
            Some(data) => route.with_data(data),
            None => route,
        };
        self.request(route).await
    }

    async fn delete(&self, path: &str, params: Params) -> Result<Value, Error> {
        self.request(Route::delete(path).with_params(params)).await
    }
}

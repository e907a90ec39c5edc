use serde_json::Value;

use super::Order;
use crate::{api::Api, route::Params, Error};

endpoint_group!(
    /// `/pages`
    Pages
);

impl<'a, A: Api + ?Sized> Pages<'a, A> {
    pub async fn list(&self, parent_page_id: Option<u64>, order: Option<Order>) -> Result<Value, Error> {
        let params = Params::new()
            .with("parent_page_id", parent_page_id)
            .with("order", order);
        self.api.get("/pages", params).await
    }

    pub async fn get(&self, page_id: u64) -> Result<Value, Error> {
        self.api.get(&format!("/pages/{}", page_id), Params::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::testing::{query, Recorder};

    #[tokio::test]
    async fn list_and_get() {
        let api = Recorder::default();
        let pages = Pages::new(&api);

        pages.list(Some(3), None).await.unwrap();
        assert_eq!(api.last().url(), "/pages");
        assert_eq!(query(&api.last()), vec!["parent_page_id=3"]);

        pages.get(8).await.unwrap();
        assert_eq!(api.last().url(), "/pages/8");
    }
}

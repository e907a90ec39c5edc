use serde_json::Value;

use crate::{api::Api, route::Params, Error};

endpoint_group!(
    /// `/notifications`
    Notifications
);

impl<'a, A: Api + ?Sized> Notifications<'a, A> {
    pub async fn list(&self) -> Result<Value, Error> {
        self.api.get("/notifications", Params::new()).await
    }

    pub async fn get(&self, notification_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/notifications/{}", notification_id), Params::new())
            .await
    }

    /// Marks one notification, or all of them when `notification_id` is
    /// `None`, as read.
    pub async fn mark_read(&self, notification_id: Option<u64>) -> Result<Value, Error> {
        let params = Params::new().with("notification_id", notification_id);
        self.api.post("/notifications/read", params, None).await
    }
}

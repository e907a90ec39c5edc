use serde::Serialize;
use serde_json::Value;

use super::Order;
use crate::{
    api::Api,
    route::{true_or_none, Params},
    Error,
};

endpoint_group!(
    /// `/forums`
    Forums
);

/// What to be notified about when following a forum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowForumOptions {
    /// Notify about new posts.
    pub post: Option<bool>,
    /// Send alerts.
    pub alert: Option<bool>,
    /// Send emails.
    pub email: Option<bool>,
    /// Only threads with these prefixes.
    pub prefix_ids: Vec<u64>,
    /// Only contests with at least this prize.
    pub minimal_contest_amount: Option<u64>,
}

impl FollowForumOptions {
    pub fn with_post(mut self, post: bool) -> Self {
        self.post = Some(post);
        self
    }

    pub fn with_alert(mut self, alert: bool) -> Self {
        self.alert = Some(alert);
        self
    }

    pub fn with_email(mut self, email: bool) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_prefix_ids(mut self, prefix_ids: &[u64]) -> Self {
        self.prefix_ids.extend_from_slice(prefix_ids);
        self
    }

    pub fn with_minimal_contest_amount(mut self, amount: u64) -> Self {
        self.minimal_contest_amount = Some(amount);
        self
    }

    fn to_body(&self) -> Result<Value, Error> {
        let body = FollowBody {
            post: flag(self.post),
            alert: flag(self.alert),
            email: flag(self.email),
            prefix_ids: self.prefix_ids.clone(),
            minimal_contest_amount: self.minimal_contest_amount,
        };
        serde_json::to_value(body)
            .map_err(|e| Error::InvalidRequest(format!("failed to encode follow options: {}", e)))
    }
}

#[derive(Serialize)]
struct FollowBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    post: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alert: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    prefix_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimal_contest_amount: Option<u64>,
}

/// Only a set flag is sent, as `1`.
fn flag(value: Option<bool>) -> Option<u8> {
    value.filter(|v| *v).map(|_| 1)
}

impl<'a, A: Api + ?Sized> Forums<'a, A> {
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
        self.api.get("/forums", params).await
    }

    pub async fn get(&self, forum_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/forums/{}", forum_id), Params::new())
            .await
    }

    pub async fn followers(&self, forum_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/forums/{}/followers", forum_id), Params::new())
            .await
    }

    /// Forums the authenticated user follows; `total` asks for the count
    /// only.
    pub async fn followed(&self, total: Option<bool>) -> Result<Value, Error> {
        let params = Params::new().with("total", true_or_none(total));
        self.api.get("/forums/followed", params).await
    }

    pub async fn follow(&self, forum_id: u64, options: &FollowForumOptions) -> Result<Value, Error> {
        let body = options.to_body()?;
        self.api
            .post(&format!("/forums/{}/followers", forum_id), Params::new(), Some(body))
            .await
    }

    pub async fn unfollow(&self, forum_id: u64) -> Result<Value, Error> {
        self.api
            .delete(&format!("/forums/{}/followers", forum_id), Params::new())
            .await
    }
}

//! Private conversations and their messages.

use serde_json::{json, Value};

use super::{ConversationOrder, LeaveMode};
use crate::{
    api::Api,
    route::{ListStyle, Params},
    Error,
};

endpoint_group!(
    /// `/conversations` and `/conversation-messages`
    Conversations
);

/// Paging and windowing for [`Conversations::messages`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversationMessagesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub order: Option<ConversationOrder>,
    /// Unix timestamp; only messages created before it.
    pub before: Option<i64>,
    /// Unix timestamp; only messages created after it.
    pub after: Option<i64>,
}

impl ConversationMessagesQuery {
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order(mut self, order: ConversationOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_before(mut self, before: i64) -> Self {
        self.before = Some(before);
        self
    }

    pub fn with_after(mut self, after: i64) -> Self {
        self.after = Some(after);
        self
    }
}

/// A new conversation: either with a single `recipient_id` or, for group
/// conversations, a list of recipient usernames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateConversation {
    pub message_body: String,
    pub title: Option<String>,
    pub is_group: Option<bool>,
    pub recipient_id: Option<u64>,
    pub recipients: Vec<String>,
    pub open_invite: Option<bool>,
    pub conversation_locked: Option<bool>,
    pub allow_edit_messages: Option<bool>,
}

impl CreateConversation {
    /// A private dialog with one user.
    pub fn direct(recipient_id: u64, message_body: &str) -> Self {
        Self {
            message_body: message_body.to_string(),
            recipient_id: Some(recipient_id),
            ..Self::default()
        }
    }

    /// A titled group conversation.
    pub fn group(title: &str, recipients: &[&str], message_body: &str) -> Self {
        Self {
            message_body: message_body.to_string(),
            title: Some(title.to_string()),
            is_group: Some(true),
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_open_invite(mut self, open_invite: bool) -> Self {
        self.open_invite = Some(open_invite);
        self
    }

    pub fn with_conversation_locked(mut self, locked: bool) -> Self {
        self.conversation_locked = Some(locked);
        self
    }

    pub fn with_allow_edit_messages(mut self, allow: bool) -> Self {
        self.allow_edit_messages = Some(allow);
        self
    }

    fn to_params(&self) -> Params {
        Params::new()
            .with("title", self.title.as_deref())
            .with("is_group", self.is_group)
            .with("recipient_id", self.recipient_id)
            .with_list("recipients", &self.recipients, ListStyle::Repeated)
            .with("open_invite", self.open_invite)
            .with("conversation_locked", self.conversation_locked)
            .with("allow_edit_messages", self.allow_edit_messages)
    }
}

impl<'a, A: Api + ?Sized> Conversations<'a, A> {
    pub async fn messages(
        &self,
        conversation_id: u64,
        query: &ConversationMessagesQuery,
    ) -> Result<Value, Error> {
        let params = Params::new()
            .with("conversation_id", conversation_id)
            .with("page", query.page)
            .with("limit", query.limit)
            .with("order", query.order)
            .with("before", query.before)
            .with("after", query.after);
        self.api.get("/conversation-messages", params).await
    }

    pub async fn message(&self, message_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/conversation-messages/{}", message_id), Params::new())
            .await
    }

    pub async fn create_message(
        &self,
        conversation_id: u64,
        message_body: &str,
    ) -> Result<Value, Error> {
        self.api
            .post(
                &format!("/conversation-messages/{}", conversation_id),
                Params::new(),
                Some(json!({ "message_body": message_body })),
            )
            .await
    }

    pub async fn edit_message(&self, message_id: u64, message_body: &str) -> Result<Value, Error> {
        self.api
            .put(
                &format!("/conversation-messages/{}", message_id),
                Params::new(),
                Some(json!({ "message_body": message_body })),
            )
            .await
    }

    pub async fn list(&self, page: Option<u32>, limit: Option<u32>) -> Result<Value, Error> {
        self.api
            .get(
                "/conversations",
                Params::new().with("page", page).with("limit", limit),
            )
            .await
    }

    pub async fn get(&self, conversation_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/conversation/{}", conversation_id), Params::new())
            .await
    }

    pub async fn create(&self, conversation: &CreateConversation) -> Result<Value, Error> {
        self.api
            .post(
                "/conversation",
                conversation.to_params(),
                Some(json!({ "message_body": conversation.message_body })),
            )
            .await
    }

    pub async fn leave(&self, conversation_id: u64, mode: LeaveMode) -> Result<Value, Error> {
        self.api
            .delete(
                &format!("/conversations/{}", conversation_id),
                Params::new().with("delete_type", mode),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::testing::{query, Recorder};
    use crate::route::Method;

    #[tokio::test]
    async fn messages_window() {
        let api = Recorder::default();
        let q = ConversationMessagesQuery::default()
            .with_order(ConversationOrder::NaturalReverse)
            .with_after(1_600_000_000);
        Conversations::new(&api).messages(3, &q).await.unwrap();
        assert_eq!(api.last().url(), "/conversation-messages");
        assert_eq!(
            query(&api.last()),
            vec!["conversation_id=3", "order=natural_reverse", "after=1600000000"]
        );
    }

    #[tokio::test]
    async fn group_conversation_repeats_recipients() {
        let api = Recorder::default();
        let conversation = CreateConversation::group("Team", &["alice", "bob"], "hello all")
            .with_allow_edit_messages(false);
        Conversations::new(&api).create(&conversation).await.unwrap();

        let route = api.last();
        assert_eq!(route.method(), Method::Post);
        assert_eq!(route.url(), "/conversation");
        assert_eq!(route.data(), Some(&json!({"message_body": "hello all"})));
        assert_eq!(
            query(&route),
            vec![
                "title=Team",
                "is_group=1",
                "recipients=alice",
                "recipients=bob",
                "allow_edit_messages=0",
            ]
        );
    }

    #[tokio::test]
    async fn leave_sends_delete_type() {
        let api = Recorder::default();
        Conversations::new(&api)
            .leave(8, LeaveMode::DeleteIgnore)
            .await
            .unwrap();
        assert_eq!(api.last().method(), Method::Delete);
        assert_eq!(api.last().url(), "/conversations/8");
        assert_eq!(query(&api.last()), vec!["delete_type=delete_ignore"]);
    }

    #[tokio::test]
    async fn message_paths() {
        let api = Recorder::default();
        let conversations = Conversations::new(&api);

        conversations.create_message(3, "hi").await.unwrap();
        assert_eq!(api.last().url(), "/conversation-messages/3");
        assert_eq!(api.last().data(), Some(&json!({"message_body": "hi"})));

        conversations.edit_message(11, "hi!").await.unwrap();
        assert_eq!(api.last().method(), Method::Put);
        assert_eq!(api.last().url(), "/conversation-messages/11");

        conversations.get(3).await.unwrap();
        assert_eq!(api.last().url(), "/conversation/3");
    }
}

//! Thread listing, creation (plain threads, contests, arbitrages),
//! moderation, following and polls.

use serde_json::{json, Value};

use super::{ContestType, LengthOption, Order, PrizeType, ThreadOptions, TransferType};
use crate::{
    api::Api,
    route::{one_or_none, true_or_none, ListStyle, Params},
    Error,
};

endpoint_group!(
    /// `/threads`, `/contest` and `/claims`
    Threads
);

/// Filters for [`Threads::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadListQuery {
    pub forum_id: Option<u64>,
    pub creator_user_id: Option<u64>,
    /// Only sticky threads. `false` means "don't filter".
    pub sticky: Option<bool>,
    pub thread_prefix_id: Option<u64>,
    pub thread_tag_id: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub order: Option<Order>,
}

impl ThreadListQuery {
    pub fn with_forum_id(mut self, forum_id: u64) -> Self {
        self.forum_id = Some(forum_id);
        self
    }

    pub fn with_creator_user_id(mut self, user_id: u64) -> Self {
        self.creator_user_id = Some(user_id);
        self
    }

    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = Some(sticky);
        self
    }

    pub fn with_thread_prefix_id(mut self, prefix_id: u64) -> Self {
        self.thread_prefix_id = Some(prefix_id);
        self
    }

    pub fn with_thread_tag_id(mut self, tag_id: u64) -> Self {
        self.thread_tag_id = Some(tag_id);
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

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn to_params(&self) -> Params {
        Params::new()
            .with("forum_id", self.forum_id)
            .with("creator_user_id", self.creator_user_id)
            .with("sticky", one_or_none(self.sticky))
            .with("thread_prefix_id", self.thread_prefix_id)
            .with("thread_tag_id", self.thread_tag_id)
            .with("page", self.page)
            .with("limit", self.limit)
            .with("order", self.order)
    }
}

/// Optional settings for [`Threads::create`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateThreadOptions {
    pub title_en: Option<String>,
    pub prefix_ids: Vec<u64>,
    pub thread: ThreadOptions,
}

impl CreateThreadOptions {
    pub fn with_title_en(mut self, title_en: &str) -> Self {
        self.title_en = Some(title_en.to_string());
        self
    }

    pub fn with_prefix_ids(mut self, prefix_ids: &[u64]) -> Self {
        self.prefix_ids.extend_from_slice(prefix_ids);
        self
    }

    pub fn with_thread_options(mut self, thread: ThreadOptions) -> Self {
        self.thread = thread;
        self
    }
}

/// Everything [`Threads::create_contest`] sends.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestParams {
    pub title: String,
    pub post_body: String,
    /// Required upgrade level to take part.
    pub require_like_upgrade: u32,
    /// Required number of likes to take part.
    pub require_total_like_count: u32,
    pub contest_type: ContestType,
    pub prize_type: PrizeType,
    pub title_en: Option<String>,
    pub length_value: Option<u32>,
    pub length_option: Option<LengthOption>,
    pub needed_members: Option<u32>,
    pub count_winners: Option<u32>,
    pub prize_data_money: Option<f64>,
    pub is_money_places: Option<bool>,
    /// Prize per place when `is_money_places` is set.
    pub prize_data_places: Vec<f64>,
    pub prize_data_upgrade: Option<u32>,
    pub secret_answer: Option<String>,
    pub thread: ThreadOptions,
}

impl ContestParams {
    /// A money contest ending at a fixed date.
    pub fn new(
        title: &str,
        post_body: &str,
        require_like_upgrade: u32,
        require_total_like_count: u32,
    ) -> Self {
        Self {
            title: title.to_string(),
            post_body: post_body.to_string(),
            require_like_upgrade,
            require_total_like_count,
            contest_type: ContestType::ByFinishDate,
            prize_type: PrizeType::Money,
            title_en: None,
            length_value: None,
            length_option: None,
            needed_members: None,
            count_winners: None,
            prize_data_money: None,
            is_money_places: None,
            prize_data_places: Vec::new(),
            prize_data_upgrade: None,
            secret_answer: None,
            thread: ThreadOptions::default(),
        }
    }

    pub fn with_contest_type(mut self, contest_type: ContestType) -> Self {
        self.contest_type = contest_type;
        self
    }

    pub fn with_prize_type(mut self, prize_type: PrizeType) -> Self {
        self.prize_type = prize_type;
        self
    }

    pub fn with_title_en(mut self, title_en: &str) -> Self {
        self.title_en = Some(title_en.to_string());
        self
    }

    /// Contest length for [`ContestType::ByFinishDate`].
    pub fn with_length(mut self, value: u32, option: LengthOption) -> Self {
        self.length_value = Some(value);
        self.length_option = Some(option);
        self
    }

    pub fn with_needed_members(mut self, needed_members: u32) -> Self {
        self.needed_members = Some(needed_members);
        self
    }

    pub fn with_count_winners(mut self, count_winners: u32) -> Self {
        self.count_winners = Some(count_winners);
        self
    }

    pub fn with_prize_money(mut self, amount: f64) -> Self {
        self.prize_data_money = Some(amount);
        self
    }

    /// Distinct money prizes per place.
    pub fn with_prize_places(mut self, places: &[f64]) -> Self {
        self.is_money_places = Some(true);
        self.prize_data_places.extend_from_slice(places);
        self
    }

    pub fn with_prize_upgrade(mut self, upgrade: u32) -> Self {
        self.prize_data_upgrade = Some(upgrade);
        self
    }

    pub fn with_secret_answer(mut self, answer: &str) -> Self {
        self.secret_answer = Some(answer.to_string());
        self
    }

    pub fn with_thread_options(mut self, thread: ThreadOptions) -> Self {
        self.thread = thread;
        self
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("title", &self.title)
            .with("contest_type", self.contest_type)
            .with("prize_type", self.prize_type)
            .with("require_like_upgrade", self.require_like_upgrade)
            .with("require_total_like_count", self.require_total_like_count)
            .with("title_en", self.title_en.as_deref())
            .with("length_value", self.length_value)
            .with("length_option", self.length_option)
            .with("needed_members", self.needed_members)
            .with("count_winners", self.count_winners)
            .with("prize_data_money", self.prize_data_money)
            .with("is_money_places", one_or_none(self.is_money_places))
            .with_list("prize_data_places", &self.prize_data_places, ListStyle::Brackets)
            .with("prize_data_upgrade", self.prize_data_upgrade)
            .with("secret_answer", self.secret_answer.as_deref());
        self.thread.add_to_params(&mut params);
        params
    }
}

/// Everything [`Threads::create_arbitrage`] sends.
#[derive(Debug, Clone, PartialEq)]
pub struct ArbitrageParams {
    /// Username or profile link of the accused user.
    pub as_responder: String,
    pub as_amount: f64,
    pub post_body: String,
    pub as_is_market_deal: bool,
    pub transfer_type: TransferType,
    pub as_market_item_id: Option<u64>,
    pub as_data: Option<String>,
    pub currency: Option<String>,
    pub as_funds_receipt: Option<String>,
    pub as_tg_login_screenshot: Option<String>,
    pub thread: ThreadOptions,
}

impl ArbitrageParams {
    /// A market-deal arbitrage with a safe transfer.
    pub fn new(as_responder: &str, as_amount: f64, post_body: &str) -> Self {
        Self {
            as_responder: as_responder.to_string(),
            as_amount,
            post_body: post_body.to_string(),
            as_is_market_deal: true,
            transfer_type: TransferType::Safe,
            as_market_item_id: None,
            as_data: None,
            currency: None,
            as_funds_receipt: None,
            as_tg_login_screenshot: None,
            thread: ThreadOptions::default(),
        }
    }

    pub fn with_market_deal(mut self, is_market_deal: bool) -> Self {
        self.as_is_market_deal = is_market_deal;
        self
    }

    pub fn with_transfer_type(mut self, transfer_type: TransferType) -> Self {
        self.transfer_type = transfer_type;
        self
    }

    pub fn with_market_item_id(mut self, item_id: u64) -> Self {
        self.as_market_item_id = Some(item_id);
        self
    }

    pub fn with_data(mut self, data: &str) -> Self {
        self.as_data = Some(data.to_string());
        self
    }

    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = Some(currency.to_string());
        self
    }

    pub fn with_funds_receipt(mut self, receipt: &str) -> Self {
        self.as_funds_receipt = Some(receipt.to_string());
        self
    }

    pub fn with_tg_login_screenshot(mut self, screenshot: &str) -> Self {
        self.as_tg_login_screenshot = Some(screenshot.to_string());
        self
    }

    pub fn with_thread_options(mut self, thread: ThreadOptions) -> Self {
        self.thread = thread;
        self
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("as_responder", &self.as_responder)
            .with("as_is_market_deal", self.as_is_market_deal)
            .with("as_amount", self.as_amount)
            .with("transfer_type", self.transfer_type)
            .with("as_market_item_id", self.as_market_item_id)
            .with("as_data", self.as_data.as_deref())
            .with("currency", self.currency.as_deref())
            .with("as_funds_receipt", self.as_funds_receipt.as_deref())
            .with("as_tg_login_screenshot", self.as_tg_login_screenshot.as_deref());
        self.thread.add_to_params(&mut params);
        params
    }
}

/// Fields [`Threads::edit`] may change; unset fields stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditThreadOptions {
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub prefix_ids: Vec<u64>,
    pub tags: Vec<String>,
    pub hide_contacts: Option<bool>,
    pub allow_ask_hidden_content: Option<bool>,
    pub reply_group: Option<u32>,
    pub comment_ignore_group: Option<bool>,
}

impl EditThreadOptions {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_title_en(mut self, title_en: &str) -> Self {
        self.title_en = Some(title_en.to_string());
        self
    }

    pub fn with_prefix_ids(mut self, prefix_ids: &[u64]) -> Self {
        self.prefix_ids.extend_from_slice(prefix_ids);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    pub fn with_hide_contacts(mut self, hide: bool) -> Self {
        self.hide_contacts = Some(hide);
        self
    }

    pub fn with_allow_ask_hidden_content(mut self, allow: bool) -> Self {
        self.allow_ask_hidden_content = Some(allow);
        self
    }

    pub fn with_reply_group(mut self, group: u32) -> Self {
        self.reply_group = Some(group);
        self
    }

    pub fn with_comment_ignore_group(mut self, ignore: bool) -> Self {
        self.comment_ignore_group = Some(ignore);
        self
    }

    pub fn to_params(&self) -> Params {
        Params::new()
            .with("title", self.title.as_deref())
            .with("title_en", self.title_en.as_deref())
            .with_list("prefix_id", &self.prefix_ids, ListStyle::Brackets)
            .with_list("tags", &self.tags, ListStyle::Repeated)
            .with("hide_contacts", self.hide_contacts)
            .with("allow_ask_hidden_content", self.allow_ask_hidden_content)
            .with("reply_group", self.reply_group)
            .with("comment_ignore_group", self.comment_ignore_group)
    }
}

/// Optional settings for [`Threads::move_to`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveThreadOptions {
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub prefix_ids: Vec<u64>,
    pub apply_thread_prefix: Option<bool>,
    pub send_alert: Option<bool>,
}

impl MoveThreadOptions {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_title_en(mut self, title_en: &str) -> Self {
        self.title_en = Some(title_en.to_string());
        self
    }

    /// Replace the thread prefixes with these.
    pub fn with_prefix_ids(mut self, prefix_ids: &[u64]) -> Self {
        self.prefix_ids.extend_from_slice(prefix_ids);
        self.apply_thread_prefix = Some(true);
        self
    }

    pub fn with_send_alert(mut self, send_alert: bool) -> Self {
        self.send_alert = Some(send_alert);
        self
    }
}

impl<'a, A: Api + ?Sized> Threads<'a, A> {
    pub async fn list(&self, query: &ThreadListQuery) -> Result<Value, Error> {
        self.api.get("/threads", query.to_params()).await
    }

    pub async fn get(&self, thread_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/threads/{}", thread_id), Params::new())
            .await
    }

    /// Creates a thread. The post body travels as JSON, everything else in
    /// the query string.
    pub async fn create(
        &self,
        forum_id: u64,
        title: &str,
        post_body: &str,
        options: &CreateThreadOptions,
    ) -> Result<Value, Error> {
        let mut params = Params::new()
            .with("forum_id", forum_id)
            .with("title", title)
            .with("title_en", options.title_en.as_deref())
            .with_list("prefix_id", &options.prefix_ids, ListStyle::Brackets);
        options.thread.add_to_params(&mut params);
        self.api
            .post("/threads", params, Some(json!({ "post_body": post_body })))
            .await
    }

    pub async fn create_contest(&self, contest: &ContestParams) -> Result<Value, Error> {
        self.api
            .post(
                "/contest",
                contest.to_params(),
                Some(json!({ "post_body": contest.post_body })),
            )
            .await
    }

    pub async fn create_arbitrage(&self, arbitrage: &ArbitrageParams) -> Result<Value, Error> {
        self.api
            .post(
                "/claims",
                arbitrage.to_params(),
                Some(json!({ "post_body": arbitrage.post_body })),
            )
            .await
    }

    pub async fn edit(&self, thread_id: u64, options: &EditThreadOptions) -> Result<Value, Error> {
        self.api
            .put(&format!("/threads/{}", thread_id), options.to_params(), None)
            .await
    }

    pub async fn delete(&self, thread_id: u64, reason: Option<&str>) -> Result<Value, Error> {
        self.api
            .delete(
                &format!("/threads/{}", thread_id),
                Params::new().with("reason", reason),
            )
            .await
    }

    pub async fn bump(&self, thread_id: u64) -> Result<Value, Error> {
        self.api
            .post(&format!("/threads/{}/bump", thread_id), Params::new(), None)
            .await
    }

    /// Moves a thread to another forum node.
    pub async fn move_to(
        &self,
        thread_id: u64,
        node_id: u64,
        options: &MoveThreadOptions,
    ) -> Result<Value, Error> {
        let params = Params::new()
            .with("node_id", node_id)
            .with("title", options.title.as_deref())
            .with("title_en", options.title_en.as_deref())
            .with_list("prefix_id", &options.prefix_ids, ListStyle::Brackets)
            .with("apply_thread_prefix", one_or_none(options.apply_thread_prefix))
            .with("send_alert", options.send_alert);
        self.api
            .post(&format!("/threads/{}/move", thread_id), params, None)
            .await
    }

    pub async fn followers(&self, thread_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/threads/{}/followers", thread_id), Params::new())
            .await
    }

    pub async fn followed(&self, total: Option<bool>) -> Result<Value, Error> {
        self.api
            .get("/threads/followed", Params::new().with("total", true_or_none(total)))
            .await
    }

    pub async fn follow(&self, thread_id: u64, email: Option<bool>) -> Result<Value, Error> {
        self.api
            .post(
                &format!("/threads/{}/followers", thread_id),
                Params::new().with("email", one_or_none(email)),
                None,
            )
            .await
    }

    pub async fn unfollow(&self, thread_id: u64) -> Result<Value, Error> {
        self.api
            .delete(&format!("/threads/{}/followers", thread_id), Params::new())
            .await
    }

    /// Navigation elements (breadcrumbs) of a thread.
    pub async fn navigation(&self, thread_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/threads/{}/navigation", thread_id), Params::new())
            .await
    }

    pub async fn poll(&self, thread_id: u64) -> Result<Value, Error> {
        self.api
            .get(&format!("/threads/{}/poll", thread_id), Params::new())
            .await
    }

    /// Votes in a poll: `response_id` for single-choice polls,
    /// `response_ids` for multiple choice.
    pub async fn vote(
        &self,
        thread_id: u64,
        response_id: Option<u64>,
        response_ids: &[u64],
    ) -> Result<Value, Error> {
        let params = Params::new()
            .with("response_id", response_id)
            .with_list("response_ids", response_ids, ListStyle::Brackets);
        self.api
            .post(&format!("/threads/{}/poll/votes", thread_id), params, None)
            .await
    }

    pub async fn unread(
        &self,
        limit: Option<u32>,
        forum_id: Option<u64>,
        data_limit: Option<u32>,
    ) -> Result<Value, Error> {
        let params = Params::new()
            .with("limit", limit)
            .with("forum_id", forum_id)
            .with("data_limit", data_limit);
        self.api.get("/threads/new", params).await
    }

    /// Threads created in the last `days` days.
    pub async fn recent(
        &self,
        days: Option<u32>,
        limit: Option<u32>,
        forum_id: Option<u64>,
        data_limit: Option<u32>,
    ) -> Result<Value, Error> {
        let params = Params::new()
            .with("days", days)
            .with("limit", limit)
            .with("forum_id", forum_id)
            .with("data_limit", data_limit);
        self.api.get("/threads/recent", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::testing::{query, Recorder};
    use crate::route::Method;

    #[tokio::test]
    async fn list_encodes_filters() {
        let api = Recorder::default();
        let query_ = ThreadListQuery::default()
            .with_forum_id(876)
            .with_sticky(false)
            .with_page(2)
            .with_order(Order::Natural);
        Threads::new(&api).list(&query_).await.unwrap();
        let route = api.last();
        assert_eq!(route.url(), "/threads");
        assert_eq!(query(&route), vec!["forum_id=876", "page=2", "order=natural"]);
    }

    #[tokio::test]
    async fn create_puts_body_in_json_and_prefixes_in_brackets() {
        let api = Recorder::default();
        let options = CreateThreadOptions::default()
            .with_prefix_ids(&[5, 6])
            .with_thread_options(ThreadOptions::default().with_tag("news").with_reply_group(2));
        Threads::new(&api)
            .create(876, "Hello", "Body text", &options)
            .await
            .unwrap();

        let route = api.last();
        assert_eq!(route.method(), Method::Post);
        assert_eq!(route.url(), "/threads");
        assert_eq!(route.data(), Some(&json!({"post_body": "Body text"})));
        assert_eq!(
            query(&route),
            vec![
                "forum_id=876",
                "title=Hello",
                "prefix_id[]=5",
                "prefix_id[]=6",
                "tags=news",
                "reply_group=2",
            ]
        );
    }

    #[tokio::test]
    async fn contest_defaults() {
        let api = Recorder::default();
        let contest = ContestParams::new("Giveaway", "Win things", 1, 10)
            .with_length(3, LengthOption::Days)
            .with_prize_places(&[100.0, 50.0]);
        Threads::new(&api).create_contest(&contest).await.unwrap();

        let route = api.last();
        assert_eq!(route.url(), "/contest");
        assert_eq!(
            query(&route),
            vec![
                "title=Giveaway",
                "contest_type=by_finish_date",
                "prize_type=money",
                "require_like_upgrade=1",
                "require_total_like_count=10",
                "length_value=3",
                "length_option=days",
                "is_money_places=1",
                "prize_data_places[]=100",
                "prize_data_places[]=50",
            ]
        );
    }

    #[tokio::test]
    async fn arbitrage_defaults() {
        let api = Recorder::default();
        let arbitrage = ArbitrageParams::new("scammer", 250.5, "Details").with_currency("rub");
        Threads::new(&api).create_arbitrage(&arbitrage).await.unwrap();

        let route = api.last();
        assert_eq!(route.url(), "/claims");
        assert_eq!(route.data(), Some(&json!({"post_body": "Details"})));
        assert_eq!(
            query(&route),
            vec![
                "as_responder=scammer",
                "as_is_market_deal=1",
                "as_amount=250.5",
                "transfer_type=safe",
                "currency=rub",
            ]
        );
    }

    #[tokio::test]
    async fn edit_is_put_without_body() {
        let api = Recorder::default();
        let options = EditThreadOptions::default().with_title("New").with_tags(&["a", "b"]);
        Threads::new(&api).edit(10, &options).await.unwrap();

        let route = api.last();
        assert_eq!(route.method(), Method::Put);
        assert_eq!(route.url(), "/threads/10");
        assert!(!route.has_data());
        assert_eq!(query(&route), vec!["title=New", "tags=a", "tags=b"]);
    }

    #[tokio::test]
    async fn move_applies_prefixes() {
        let api = Recorder::default();
        let options = MoveThreadOptions::default().with_prefix_ids(&[9]);
        Threads::new(&api).move_to(10, 22, &options).await.unwrap();
        assert_eq!(api.last().url(), "/threads/10/move");
        assert_eq!(
            query(&api.last()),
            vec!["node_id=22", "prefix_id[]=9", "apply_thread_prefix=1"]
        );
    }

    #[tokio::test]
    async fn vote_uses_bracketed_ids() {
        let api = Recorder::default();
        Threads::new(&api).vote(3, None, &[1, 2]).await.unwrap();
        assert_eq!(api.last().url(), "/threads/3/poll/votes");
        assert_eq!(query(&api.last()), vec!["response_ids[]=1", "response_ids[]=2"]);
    }

    #[tokio::test]
    async fn follow_and_unfollow() {
        let api = Recorder::default();
        let threads = Threads::new(&api);

        threads.follow(4, Some(true)).await.unwrap();
        assert_eq!(api.last().method(), Method::Post);
        assert_eq!(query(&api.last()), vec!["email=1"]);

        threads.unfollow(4).await.unwrap();
        assert_eq!(api.last().method(), Method::Delete);
        assert_eq!(api.last().url(), "/threads/4/followers");
        assert_eq!(api.count(), 2);
    }

    #[tokio::test]
    async fn simple_paths() {
        let api = Recorder::default();
        let threads = Threads::new(&api);

        threads.bump(1).await.unwrap();
        assert_eq!(api.last().url(), "/threads/1/bump");
        threads.navigation(1).await.unwrap();
        assert_eq!(api.last().url(), "/threads/1/navigation");
        threads.poll(1).await.unwrap();
        assert_eq!(api.last().url(), "/threads/1/poll");
        threads.unread(Some(5), None, None).await.unwrap();
        assert_eq!(api.last().url(), "/threads/new");
        threads.recent(Some(7), None, None, None).await.unwrap();
        assert_eq!(api.last().url(), "/threads/recent");
        assert_eq!(query(&api.last()), vec!["days=7"]);
        threads.delete(1, Some("spam")).await.unwrap();
        assert_eq!(api.last().method(), Method::Delete);
        assert_eq!(query(&api.last()), vec!["reason=spam"]);
    }
}

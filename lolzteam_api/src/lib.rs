//! Typed async client for the Lolzteam forum API.
//!
//! [`Client`] owns the HTTP session, the authentication token and a
//! minimum-delay rate limiter. Resource groups (`threads`, `users`, ...) are
//! reached through the [`Endpoints`] trait; responses come back as
//! [`serde_json::Value`].
//!
//! ```no_run
//! use lolzteam_api::prelude::*;
//! use lolzteam_api::{Client, ThreadListQuery};
//!
//! # async fn demo() -> lolzteam_api::Result<()> {
//! let client = Client::builder().api_key("token").build()?;
//! let threads = client
//!     .threads()
//!     .list(&ThreadListQuery::default().with_forum_id(876))
//!     .await?;
//! println!("{}", threads["threads"]);
//! # Ok(())
//! # }
//! ```
mod api;
mod client;
mod config;
mod endpoints;
mod errors;
mod rate_limiter;
pub mod request;
pub mod response;
mod route;

pub use self::api::Api;
pub use self::client::Client;
pub use self::config::{
    ClientBuilder, ClientConfig, API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MIN_DELAY,
    DEFAULT_REQUEST_LIMIT,
};
pub use self::endpoints::{
    ArbitrageParams, Batch, Categories, ContestParams, ContestType, ConversationMessagesQuery,
    ConversationOrder, Conversations, CreateConversation, CreateThreadOptions, EditThreadOptions,
    EditUserOptions, Endpoints, FindUsersQuery, FollowForumOptions, Forums, LeaveMode,
    LengthOption, MoveThreadOptions, Navigation, Notifications, Order, Pages, PostListQuery,
    PostOrder, Posts, PrizeType, ProfilePosts, Search, SearchQuery, Tags, ThreadListQuery,
    ThreadOptions, Threads, TransferType, UserFields, UserOrder, UserRef, Users,
};
pub use self::errors::{Error, ErrorKind, RequestSummary, Result};
pub use self::rate_limiter::RateLimiter;
pub use self::route::{
    one_or_none, true_or_none, FilePart, Files, ListStyle, Method, ParamValue, Params, Route,
    ToParam,
};

/// The traits needed to call endpoint groups on a client.
pub mod prelude {
    pub use crate::{Api, Endpoints};
}

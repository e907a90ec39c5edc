//! Resource endpoint groups.
//!
//! Each group is a thin borrowed handle over any [`Api`] implementation and
//! turns typed arguments into a [`Route`](crate::Route). Nothing here touches
//! the network directly.

/// Declares an endpoint group handle borrowing an [`Api`].
macro_rules! endpoint_group {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<'a, A: ?Sized> {
            api: &'a A,
        }

        impl<'a, A: $crate::api::Api + ?Sized> $name<'a, A> {
            pub fn new(api: &'a A) -> Self {
                Self { api }
            }
        }
    };
}

mod common;
pub use self::common::{
    ContestType, ConversationOrder, LeaveMode, LengthOption, Order, PostOrder, PrizeType,
    ThreadOptions, TransferType, UserOrder, UserRef,
};

mod batch;
pub use self::batch::Batch;
mod categories;
pub use self::categories::Categories;
mod conversations;
pub use self::conversations::{ConversationMessagesQuery, Conversations, CreateConversation};
mod forums;
pub use self::forums::{FollowForumOptions, Forums};
mod navigation;
pub use self::navigation::Navigation;
mod notifications;
pub use self::notifications::Notifications;
mod pages;
pub use self::pages::Pages;
mod posts;
pub use self::posts::{PostListQuery, Posts};
mod profile_posts;
pub use self::profile_posts::ProfilePosts;
mod search;
pub use self::search::{Search, SearchQuery};
mod tags;
pub use self::tags::Tags;
mod threads;
pub use self::threads::{
    ArbitrageParams, ContestParams, CreateThreadOptions, EditThreadOptions, MoveThreadOptions,
    ThreadListQuery, Threads,
};
mod users;
pub use self::users::{EditUserOptions, FindUsersQuery, UserFields, Users};

use crate::api::Api;

/// Accessors for every endpoint group, available on anything that
/// implements [`Api`].
///
/// ```no_run
/// # async fn demo() -> Result<(), lolzteam_api::Error> {
/// use lolzteam_api::prelude::*;
///
/// let client = lolzteam_api::Client::new()?;
/// let thread = client.threads().get(5_523_020).await?;
/// println!("{}", thread["thread"]["thread_title"]);
/// # Ok(())
/// # }
/// ```
pub trait Endpoints: Api {
    fn categories(&self) -> Categories<'_, Self> {
        Categories::new(self)
    }

    fn forums(&self) -> Forums<'_, Self> {
        Forums::new(self)
    }

    fn pages(&self) -> Pages<'_, Self> {
        Pages::new(self)
    }

    fn navigation(&self) -> Navigation<'_, Self> {
        Navigation::new(self)
    }

    fn threads(&self) -> Threads<'_, Self> {
        Threads::new(self)
    }

    fn posts(&self) -> Posts<'_, Self> {
        Posts::new(self)
    }

    fn users(&self) -> Users<'_, Self> {
        Users::new(self)
    }

    fn profile_posts(&self) -> ProfilePosts<'_, Self> {
        ProfilePosts::new(self)
    }

    fn conversations(&self) -> Conversations<'_, Self> {
        Conversations::new(self)
    }

    fn notifications(&self) -> Notifications<'_, Self> {
        Notifications::new(self)
    }

    fn tags(&self) -> Tags<'_, Self> {
        Tags::new(self)
    }

    fn search(&self) -> Search<'_, Self> {
        Search::new(self)
    }

    fn batch(&self) -> Batch<'_, Self> {
        Batch::new(self)
    }
}

impl<A: Api + ?Sized> Endpoints for A {}

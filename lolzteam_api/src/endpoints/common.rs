//! Shared option types: ordering enums, [`UserRef`] and the [`ThreadOptions`]
//! every thread-creating endpoint accepts.

use std::fmt;

use crate::route::{one_or_none, ListStyle, ParamValue, Params, ToParam};

macro_rules! display_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $($name::$variant => $text),+
                })
            }
        }

        impl ToParam for $name {
            fn to_param(self) -> Option<ParamValue> {
                Some(ParamValue::Scalar(self.to_string()))
            }
        }
    };
}

display_enum!(
    /// Ordering of category, forum and page listings.
    Order {
        Natural => "natural",
        List => "list",
    }
);

display_enum!(
    /// Ordering of posts in a thread.
    PostOrder {
        Natural => "natural",
        NaturalReverse => "natural_reverse",
        PostLikes => "post_likes",
        PostLikesReverse => "post_likes_reverse",
    }
);

display_enum!(
    /// Ordering of follower listings.
    UserOrder {
        Natural => "natural",
        FollowDate => "follow_date",
        FollowDateReverse => "follow_date_reverse",
    }
);

display_enum!(
    ConversationOrder {
        Natural => "natural",
        NaturalReverse => "natural_reverse",
    }
);

display_enum!(
    /// What happens to a conversation when leaving it.
    LeaveMode {
        /// Leave, but come back on new messages.
        Delete => "delete",
        /// Leave and ignore further messages.
        DeleteIgnore => "delete_ignore",
    }
);

display_enum!(
    ContestType {
        ByFinishDate => "by_finish_date",
        ByNeededMembers => "by_needed_members",
    }
);

display_enum!(
    PrizeType {
        Money => "money",
        Upgrades => "upgrades",
    }
);

display_enum!(
    LengthOption {
        Minutes => "minutes",
        Hours => "hours",
        Days => "days",
    }
);

display_enum!(
    /// Arbitrage transfer kind.
    TransferType {
        Safe => "safe",
        NotSafe => "notsafe",
    }
);

/// A user addressed by id, or the authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRef {
    Id(u64),
    Me,
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRef::Id(id) => write!(f, "{}", id),
            UserRef::Me => f.write_str("me"),
        }
    }
}

impl From<u64> for UserRef {
    fn from(id: u64) -> Self {
        UserRef::Id(id)
    }
}

impl ToParam for UserRef {
    fn to_param(self) -> Option<ParamValue> {
        Some(ParamValue::Scalar(self.to_string()))
    }
}

/// Visibility and notification settings shared by thread, contest and
/// arbitrage creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadOptions {
    pub tags: Vec<String>,
    pub hide_contacts: Option<bool>,
    pub allow_ask_hidden_content: Option<bool>,
    /// Minimal user group allowed to reply (0, 2, 21, 22, 23, 60, 351).
    pub reply_group: Option<u32>,
    pub comment_ignore_group: Option<bool>,
    pub dont_alert_followers: Option<bool>,
    pub watch_thread_state: Option<bool>,
    pub watch_thread: Option<bool>,
    pub watch_thread_email: Option<bool>,
}

impl ThreadOptions {
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
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

    pub fn with_dont_alert_followers(mut self, dont: bool) -> Self {
        self.dont_alert_followers = Some(dont);
        self
    }

    /// Subscribe to the created thread; `email` also subscribes by mail.
    pub fn with_watch(mut self, email: bool) -> Self {
        self.watch_thread_state = Some(true);
        self.watch_thread = Some(true);
        self.watch_thread_email = Some(email);
        self
    }

    /// Appends the options to `params`.
    pub fn add_to_params(&self, params: &mut Params) {
        let mut added = Params::new()
            .with_list("tags", &self.tags, ListStyle::Repeated)
            .with("hide_contacts", self.hide_contacts)
            .with("allow_ask_hidden_content", self.allow_ask_hidden_content)
            .with("reply_group", self.reply_group)
            .with("comment_ignore_group", self.comment_ignore_group)
            .with("dont_alert_followers", self.dont_alert_followers);
        added.insert("watch_thread_state", one_or_none(self.watch_thread_state));
        added.insert("watch_thread", one_or_none(self.watch_thread));
        added.insert("watch_thread_email", one_or_none(self.watch_thread_email));
        params.extend(added);
    }
}

//! User profiles, avatars and backgrounds, following and ignoring.

use serde_json::Value;

use super::{UserOrder, UserRef};
use crate::{
    api::Api,
    route::{true_or_none, FilePart, Files, ListStyle, Params},
    Error,
};

endpoint_group!(
    /// `/users`
    Users
);

/// Profile fields addressed by name, rendered as `prefix[name]=value`.
///
/// The same set of names is used for searching (`custom_fields[...]`) and
/// editing (`fields[...]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFields {
    entries: Vec<(String, String)>,
}

impl UserFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any field by its forum name.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.entries.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_location(self, value: &str) -> Self {
        self.with("location", value)
    }

    pub fn with_occupation(self, value: &str) -> Self {
        self.with("occupation", value)
    }

    pub fn with_homepage(self, value: &str) -> Self {
        self.with("homepage", value)
    }

    pub fn with_telegram(self, value: &str) -> Self {
        self.with("telegram", value)
    }

    pub fn with_vk(self, value: &str) -> Self {
        self.with("vk", value)
    }

    pub fn with_discord(self, value: &str) -> Self {
        self.with("discord", value)
    }

    pub fn with_steam(self, value: &str) -> Self {
        self.with("steam", value)
    }

    pub fn with_jabber(self, value: &str) -> Self {
        self.with("jabber", value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add_to_params(&self, prefix: &str, params: &mut Params) {
        for (name, value) in &self.entries {
            params.insert(format!("{}[{}]", prefix, name), value);
        }
    }
}

/// Filters for [`Users::find`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindUsersQuery {
    pub username: Option<String>,
    pub user_email: Option<String>,
    pub custom_fields: UserFields,
}

impl FindUsersQuery {
    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    /// Only usable by administrators.
    pub fn with_user_email(mut self, email: &str) -> Self {
        self.user_email = Some(email.to_string());
        self
    }

    pub fn with_custom_fields(mut self, fields: UserFields) -> Self {
        self.custom_fields = fields;
        self
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("username", self.username.as_deref())
            .with("user_email", self.user_email.as_deref());
        self.custom_fields.add_to_params("custom_fields", &mut params);
        params
    }
}

/// Profile changes for [`Users::edit`]; unset fields stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditUserOptions {
    pub user_title: Option<String>,
    pub primary_group_id: Option<u64>,
    pub secondary_group_ids: Vec<u64>,
    pub display_group_id: Option<u64>,
    pub user_dob_day: Option<u8>,
    pub user_dob_month: Option<u8>,
    pub user_dob_year: Option<u16>,
    pub fields: UserFields,
}

impl EditUserOptions {
    pub fn with_user_title(mut self, title: &str) -> Self {
        self.user_title = Some(title.to_string());
        self
    }

    pub fn with_primary_group_id(mut self, group_id: u64) -> Self {
        self.primary_group_id = Some(group_id);
        self
    }

    pub fn with_secondary_group_ids(mut self, group_ids: &[u64]) -> Self {
        self.secondary_group_ids.extend_from_slice(group_ids);
        self
    }

    pub fn with_display_group_id(mut self, group_id: u64) -> Self {
        self.display_group_id = Some(group_id);
        self
    }

    pub fn with_birthday(mut self, day: u8, month: u8, year: u16) -> Self {
        self.user_dob_day = Some(day);
        self.user_dob_month = Some(month);
        self.user_dob_year = Some(year);
        self
    }

    pub fn with_fields(mut self, fields: UserFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("user_title", self.user_title.as_deref())
            .with("primary_group_id", self.primary_group_id)
            .with_list(
                "secondary_group_ids",
                &self.secondary_group_ids,
                ListStyle::Brackets,
            )
            .with("display_group_id", self.display_group_id)
            .with("user_dob_day", self.user_dob_day)
            .with("user_dob_month", self.user_dob_month)
            .with("user_dob_year", self.user_dob_year);
        self.fields.add_to_params("fields", &mut params);
        params
    }
}

fn crop_params(crop: u32, x: Option<u32>, y: Option<u32>) -> Params {
    Params::new()
        .with("x", x)
        .with("y", y)
        .with("crop", crop)
}

impl<'a, A: Api + ?Sized> Users<'a, A> {
    pub async fn upload_avatar(
        &self,
        user: impl Into<UserRef>,
        avatar: FilePart,
    ) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .post_files(
                &format!("/users/{}/avatar", user),
                Params::new(),
                Files::new().with("avatar", avatar),
                None,
            )
            .await
    }

    /// Crops the current avatar to a `crop`-sized square at (`x`, `y`).
    pub async fn crop_avatar(
        &self,
        user: impl Into<UserRef>,
        crop: u32,
        x: Option<u32>,
        y: Option<u32>,
    ) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .post(
                &format!("/users/{}/avatar/crop", user),
                crop_params(crop, x, y),
                None,
            )
            .await
    }

    pub async fn delete_avatar(&self, user: impl Into<UserRef>) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .delete(&format!("/users/{}/avatar", user), Params::new())
            .await
    }

    pub async fn upload_background(
        &self,
        user: impl Into<UserRef>,
        background: FilePart,
        crop: u32,
        x: Option<u32>,
        y: Option<u32>,
    ) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .post_files(
                &format!("/users/{}/background", user),
                crop_params(crop, x, y),
                Files::new().with("background", background),
                None,
            )
            .await
    }

    pub async fn delete_background(&self, user: impl Into<UserRef>) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .delete(&format!("/users/{}/background", user), Params::new())
            .await
    }

    pub async fn crop_background(
        &self,
        user: impl Into<UserRef>,
        crop: u32,
        x: Option<u32>,
        y: Option<u32>,
    ) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .post(
                &format!("/users/{}/background/crop", user),
                crop_params(crop, x, y),
                None,
            )
            .await
    }

    pub async fn list(&self, page: Option<u32>, limit: Option<u32>) -> Result<Value, Error> {
        self.api
            .get("/users", Params::new().with("page", page).with("limit", limit))
            .await
    }

    /// Profile fields the forum knows about.
    pub async fn fields(&self) -> Result<Value, Error> {
        self.api.get("/users/fields", Params::new()).await
    }

    pub async fn find(&self, query: &FindUsersQuery) -> Result<Value, Error> {
        self.api.get("/users/find", query.to_params()).await
    }

    pub async fn get(&self, user: impl Into<UserRef>) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .get(&format!("/users/{}", user), Params::new())
            .await
    }

    pub async fn edit(
        &self,
        user: impl Into<UserRef>,
        options: &EditUserOptions,
    ) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .put(&format!("/users/{}", user), options.to_params(), None)
            .await
    }

    pub async fn followers(
        &self,
        user: impl Into<UserRef>,
        order: Option<UserOrder>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Value, Error> {
        let user = user.into();
        let params = Params::new()
            .with("order", order)
            .with("page", page)
            .with("limit", limit);
        self.api
            .get(&format!("/users/{}/followers", user), params)
            .await
    }

    /// Users this user follows.
    pub async fn followings(
        &self,
        user: impl Into<UserRef>,
        order: Option<UserOrder>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Value, Error> {
        let user = user.into();
        let params = Params::new()
            .with("order", order)
            .with("page", page)
            .with("limit", limit);
        self.api
            .get(&format!("/users/{}/followings", user), params)
            .await
    }

    pub async fn follow(&self, user: impl Into<UserRef>) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .post(&format!("/users/{}/followers", user), Params::new(), None)
            .await
    }

    pub async fn unfollow(&self, user: impl Into<UserRef>) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .delete(&format!("/users/{}/followers", user), Params::new())
            .await
    }

    pub async fn ignored(&self, total: Option<bool>) -> Result<Value, Error> {
        self.api
            .get("/users/ignored", Params::new().with("total", true_or_none(total)))
            .await
    }

    pub async fn ignore(&self, user: impl Into<UserRef>) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .post(&format!("/users/{}/ignore", user), Params::new(), None)
            .await
    }

    pub async fn unignore(&self, user: impl Into<UserRef>) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .delete(&format!("/users/{}/ignore", user), Params::new())
            .await
    }

    /// Contests the user took part in, read from their timeline.
    pub async fn contests(
        &self,
        user: impl Into<UserRef>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Value, Error> {
        let user = user.into();
        self.api
            .get(
                &format!("/users/{}/timeline", user),
                Params::new().with("page", page).with("limit", limit),
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
    async fn avatar_upload_is_multipart() {
        let api = Recorder::default();
        let part = FilePart::new(vec![1, 2, 3]).with_file_name("me.png");
        Users::new(&api)
            .upload_avatar(UserRef::Me, part.clone())
            .await
            .unwrap();

        let route = api.last();
        assert_eq!(route.method(), Method::Post);
        assert_eq!(route.url(), "/users/me/avatar");
        let files: Vec<_> = route.files().iter().collect();
        assert_eq!(files, vec![("avatar", &part)]);
    }

    #[tokio::test]
    async fn background_upload_carries_crop_params() {
        let api = Recorder::default();
        Users::new(&api)
            .upload_background(12u64, FilePart::new(vec![0]), 200, Some(5), None)
            .await
            .unwrap();
        let route = api.last();
        assert_eq!(route.url(), "/users/12/background");
        assert!(route.has_files());
        assert_eq!(query(&route), vec!["x=5", "crop=200"]);
    }

    #[tokio::test]
    async fn find_uses_custom_field_keys() {
        let api = Recorder::default();
        let q = FindUsersQuery::default()
            .with_username("alice")
            .with_custom_fields(UserFields::new().with_telegram("alice_tg"));
        Users::new(&api).find(&q).await.unwrap();
        assert_eq!(api.last().url(), "/users/find");
        assert_eq!(
            query(&api.last()),
            vec!["username=alice", "custom_fields[telegram]=alice_tg"]
        );
    }

    #[tokio::test]
    async fn edit_uses_field_keys_and_bracketed_groups() {
        let api = Recorder::default();
        let options = EditUserOptions::default()
            .with_secondary_group_ids(&[2, 3])
            .with_birthday(1, 2, 1990)
            .with_fields(UserFields::new().with_location("Moon"));
        Users::new(&api).edit(UserRef::Me, &options).await.unwrap();

        let route = api.last();
        assert_eq!(route.method(), Method::Put);
        assert_eq!(route.url(), "/users/me");
        assert_eq!(
            query(&route),
            vec![
                "secondary_group_ids[]=2",
                "secondary_group_ids[]=3",
                "user_dob_day=1",
                "user_dob_month=2",
                "user_dob_year=1990",
                "fields[location]=Moon",
            ]
        );
    }

    #[tokio::test]
    async fn follow_ignore_and_timeline() {
        let api = Recorder::default();
        let users = Users::new(&api);

        users.follow(7u64).await.unwrap();
        assert_eq!(api.last().method(), Method::Post);
        assert_eq!(api.last().url(), "/users/7/followers");
        users.unfollow(7u64).await.unwrap();
        assert_eq!(api.last().method(), Method::Delete);

        users
            .followings(7u64, Some(UserOrder::FollowDate), None, None)
            .await
            .unwrap();
        assert_eq!(api.last().url(), "/users/7/followings");
        assert_eq!(query(&api.last()), vec!["order=follow_date"]);

        users.ignored(Some(true)).await.unwrap();
        assert_eq!(query(&api.last()), vec!["total=true"]);
        users.ignore(7u64).await.unwrap();
        assert_eq!(api.last().url(), "/users/7/ignore");
        users.unignore(7u64).await.unwrap();
        assert_eq!(api.last().method(), Method::Delete);

        users.contests(7u64, Some(1), None).await.unwrap();
        assert_eq!(api.last().url(), "/users/7/timeline");
        users.crop_avatar(7u64, 64, None, None).await.unwrap();
        assert_eq!(api.last().url(), "/users/7/avatar/crop");
        assert_eq!(query(&api.last()), vec!["crop=64"]);
    }
}

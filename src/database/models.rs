use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct TagModel {
    pub id: i64,
    pub guild_id: i64,
    pub name: String,
    pub text: String,
    pub owner_id: i64,
    pub nsfw: bool,
    pub uses: i64,
    pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct TodoModel {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub text: String,
    pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct TelephoneLineModel {
    pub guild_id: i64,
    pub channel_id: i64,
    pub ping_role_id: Option<i64>,
    pub member_ping_id: Option<i64>,
    pub is_line_busy: bool,
}

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct BanModel {
    pub user_id: i64,
    pub command: bool,
    pub chat: bool,
    pub global: bool,
    pub reason: String,
    pub moderator_id: i64,
    pub created_at: String,
}

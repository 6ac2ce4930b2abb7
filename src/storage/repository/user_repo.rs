use crate::storage::entity::user::{self, ActiveModel as UserActiveModel, Model as UserModel};
use crate::storage::entity::User;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect, Set,
};

pub struct UserRepository;

impl UserRepository {
    pub async fn create(
        db: &DatabaseConnection,
        username: String,
        email: String,
        password_hash: String,
        starting_points: i32,
    ) -> Result<UserModel, sea_orm::DbErr> {
        let now = Utc::now().timestamp();
        let active_model = UserActiveModel {
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            points: Set(starting_points),
            bio: Set(None),
            dream_tag: Set(None),
            created_at: Set(now),
            ..Default::default()
        };
        active_model.insert(db).await
    }

    pub async fn by_id<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
    ) -> Result<Option<UserModel>, sea_orm::DbErr> {
        User::find_by_id(user_id).one(conn).await
    }

    pub async fn by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<UserModel>, sea_orm::DbErr> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
    }

    pub async fn update_bio(
        db: &DatabaseConnection,
        user_id: i32,
        bio: Option<String>,
    ) -> Result<(), sea_orm::DbErr> {
        User::update_many()
            .col_expr(user::Column::Bio, Expr::value(bio))
            .filter(user::Column::Id.eq(user_id))
            .exec(db)
            .await?;
        Ok(())
    }

    /// Adds a (possibly negative) delta to a balance. Callers are expected to
    /// have validated the resulting balance inside the same transaction.
    pub async fn adjust_points<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        delta: i32,
    ) -> Result<(), sea_orm::DbErr> {
        User::update_many()
            .col_expr(
                user::Column::Points,
                Expr::col(user::Column::Points).add(delta),
            )
            .filter(user::Column::Id.eq(user_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    pub async fn set_tag(
        db: &DatabaseConnection,
        user_id: i32,
        tag: Option<String>,
    ) -> Result<(), sea_orm::DbErr> {
        User::update_many()
            .col_expr(user::Column::DreamTag, Expr::value(tag))
            .filter(user::Column::Id.eq(user_id))
            .exec(db)
            .await?;
        Ok(())
    }

    pub async fn all_ids(db: &DatabaseConnection) -> Result<Vec<i32>, sea_orm::DbErr> {
        User::find()
            .select_only()
            .column(user::Column::Id)
            .into_tuple::<i32>()
            .all(db)
            .await
    }

    pub async fn by_tag(
        db: &DatabaseConnection,
        tag: &str,
        limit: Option<u64>,
    ) -> Result<Vec<UserModel>, sea_orm::DbErr> {
        let mut query = User::find().filter(user::Column::DreamTag.eq(tag));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        query.all(db).await
    }

    /// Member count per assigned tag, untagged users excluded.
    pub async fn tag_counts(
        db: &DatabaseConnection,
    ) -> Result<Vec<(String, u64)>, sea_orm::DbErr> {
        let rows = User::find()
            .select_only()
            .column(user::Column::DreamTag)
            .column_as(user::Column::Id.count(), "count")
            .filter(user::Column::DreamTag.is_not_null())
            .group_by(user::Column::DreamTag)
            .into_tuple::<(String, i64)>()
            .all(db)
            .await?;

        Ok(rows.into_iter().map(|(t, c)| (t, c as u64)).collect())
    }
}

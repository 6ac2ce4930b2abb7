use crate::storage::entity::dream::{self, ActiveModel as DreamActiveModel, Model as DreamModel};
use crate::storage::entity::{purchase, rating, Dream, Purchase, Rating};
use crate::tags::catalog::Category;
use chrono::{Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDream {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: i32,
    pub image_filename: Option<String>,
    pub author_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DreamSort {
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
    RatingHigh,
    RatingLow,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DreamSearch {
    pub text: Option<String>,
    pub category: Option<Category>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
    pub sort: Option<DreamSort>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

pub struct DreamRepository;

impl DreamRepository {
    pub async fn create(
        db: &DatabaseConnection,
        def: NewDream,
    ) -> Result<DreamModel, sea_orm::DbErr> {
        let now = Utc::now().timestamp();
        let active_model = DreamActiveModel {
            title: Set(def.title),
            description: Set(def.description),
            category: Set(def.category.as_str().to_string()),
            price: Set(def.price),
            image_filename: Set(def.image_filename),
            average_rating: Set(0.0),
            total_ratings: Set(0),
            author_id: Set(def.author_id),
            created_at: Set(now),
            ..Default::default()
        };
        active_model.insert(db).await
    }

    pub async fn by_id<C: ConnectionTrait>(
        conn: &C,
        dream_id: i32,
    ) -> Result<Option<DreamModel>, sea_orm::DbErr> {
        Dream::find_by_id(dream_id).one(conn).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        dream_id: i32,
        title: String,
        description: String,
        category: Category,
        price: i32,
        image_filename: Option<String>,
    ) -> Result<(), sea_orm::DbErr> {
        let mut update = Dream::update_many()
            .col_expr(dream::Column::Title, Expr::value(title))
            .col_expr(dream::Column::Description, Expr::value(description))
            .col_expr(
                dream::Column::Category,
                Expr::value(category.as_str().to_string()),
            )
            .col_expr(dream::Column::Price, Expr::value(price));
        if let Some(filename) = image_filename {
            update = update.col_expr(dream::Column::ImageFilename, Expr::value(Some(filename)));
        }
        update
            .filter(dream::Column::Id.eq(dream_id))
            .exec(db)
            .await?;
        Ok(())
    }

    /// Removes a dream together with its purchases and ratings.
    pub async fn delete_cascading(
        db: &DatabaseConnection,
        dream_id: i32,
    ) -> Result<(), sea_orm::DbErr> {
        let txn = db.begin().await?;
        Rating::delete_many()
            .filter(rating::Column::DreamId.eq(dream_id))
            .exec(&txn)
            .await?;
        Purchase::delete_many()
            .filter(purchase::Column::DreamId.eq(dream_id))
            .exec(&txn)
            .await?;
        Dream::delete_many()
            .filter(dream::Column::Id.eq(dream_id))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn authored_by(
        db: &DatabaseConnection,
        author_id: i32,
    ) -> Result<Vec<DreamModel>, sea_orm::DbErr> {
        Dream::find()
            .filter(dream::Column::AuthorId.eq(author_id))
            .order_by_desc(dream::Column::CreatedAt)
            .all(db)
            .await
    }

    /// Authored categories in creation order, kept for the preference
    /// analyzer whose tie-break is first-encountered order.
    pub async fn authored_categories(
        db: &DatabaseConnection,
        author_id: i32,
    ) -> Result<Vec<String>, sea_orm::DbErr> {
        Dream::find()
            .filter(dream::Column::AuthorId.eq(author_id))
            .order_by_asc(dream::Column::CreatedAt)
            .order_by_asc(dream::Column::Id)
            .select_only()
            .column(dream::Column::Category)
            .into_tuple::<String>()
            .all(db)
            .await
    }

    pub async fn distinct_authored_categories(
        db: &DatabaseConnection,
        author_id: i32,
    ) -> Result<Vec<String>, sea_orm::DbErr> {
        Dream::find()
            .filter(dream::Column::AuthorId.eq(author_id))
            .select_only()
            .column(dream::Column::Category)
            .distinct()
            .into_tuple::<String>()
            .all(db)
            .await
    }

    pub async fn count_authored(
        db: &DatabaseConnection,
        author_id: i32,
    ) -> Result<u64, sea_orm::DbErr> {
        Dream::find()
            .filter(dream::Column::AuthorId.eq(author_id))
            .count(db)
            .await
    }

    pub async fn count_authored_rated_at_least(
        db: &DatabaseConnection,
        author_id: i32,
        min_average: f64,
    ) -> Result<u64, sea_orm::DbErr> {
        Dream::find()
            .filter(dream::Column::AuthorId.eq(author_id))
            .filter(dream::Column::AverageRating.gte(min_average))
            .count(db)
            .await
    }

    /// Average of the author's per-dream averages, unrated dreams excluded.
    pub async fn rating_received(
        db: &DatabaseConnection,
        author_id: i32,
    ) -> Result<Option<f64>, sea_orm::DbErr> {
        let averages = Dream::find()
            .filter(dream::Column::AuthorId.eq(author_id))
            .filter(dream::Column::TotalRatings.gt(0))
            .select_only()
            .column(dream::Column::AverageRating)
            .into_tuple::<f64>()
            .all(db)
            .await?;

        if averages.is_empty() {
            return Ok(None);
        }
        Ok(Some(averages.iter().sum::<f64>() / averages.len() as f64))
    }

    pub async fn set_aggregates<C: ConnectionTrait>(
        conn: &C,
        dream_id: i32,
        average_rating: f64,
        total_ratings: i32,
    ) -> Result<(), sea_orm::DbErr> {
        Dream::update_many()
            .col_expr(dream::Column::AverageRating, Expr::value(average_rating))
            .col_expr(dream::Column::TotalRatings, Expr::value(total_ratings))
            .filter(dream::Column::Id.eq(dream_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    pub async fn search(
        db: &DatabaseConnection,
        filter: DreamSearch,
        page: u64,
        per_page: u64,
    ) -> Result<Page<DreamModel>, sea_orm::DbErr> {
        let mut query = Dream::find();

        if let Some(text) = filter.text.as_deref() {
            query = query.filter(
                Condition::any()
                    .add(dream::Column::Title.contains(text))
                    .add(dream::Column::Description.contains(text)),
            );
        }
        if let Some(category) = filter.category {
            query = query.filter(dream::Column::Category.eq(category.as_str()));
        }
        if let Some(min_price) = filter.min_price {
            query = query.filter(dream::Column::Price.gte(min_price));
        }
        if let Some(max_price) = filter.max_price {
            query = query.filter(dream::Column::Price.lte(max_price));
        }

        query = match filter.sort.unwrap_or(DreamSort::Newest) {
            DreamSort::Newest => query.order_by_desc(dream::Column::CreatedAt),
            DreamSort::Oldest => query.order_by_asc(dream::Column::CreatedAt),
            DreamSort::PriceLow => query.order_by_asc(dream::Column::Price),
            DreamSort::PriceHigh => query.order_by_desc(dream::Column::Price),
            DreamSort::RatingHigh => query.order_by_desc(dream::Column::AverageRating),
            DreamSort::RatingLow => query.order_by_asc(dream::Column::AverageRating),
        };

        let page = page.max(1);
        let paginator = query.paginate(db, per_page);
        let totals = paginator.num_items_and_pages().await?;
        let items = paginator.fetch_page(page - 1).await?;

        Ok(Page {
            items,
            page,
            per_page,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    /// Highest-rated dream of the past week, falling back to all-time.
    pub async fn dream_of_the_week(
        db: &DatabaseConnection,
    ) -> Result<Option<DreamModel>, sea_orm::DbErr> {
        let week_ago = (Utc::now() - Duration::days(7)).timestamp();

        let recent = Dream::find()
            .filter(dream::Column::CreatedAt.gte(week_ago))
            .filter(dream::Column::TotalRatings.gt(0))
            .order_by_desc(dream::Column::AverageRating)
            .order_by_desc(dream::Column::TotalRatings)
            .one(db)
            .await?;
        if recent.is_some() {
            return Ok(recent);
        }

        Dream::find()
            .filter(dream::Column::TotalRatings.gt(0))
            .order_by_desc(dream::Column::AverageRating)
            .order_by_desc(dream::Column::TotalRatings)
            .one(db)
            .await
    }

    pub async fn trending(
        db: &DatabaseConnection,
        limit: u64,
    ) -> Result<Vec<DreamModel>, sea_orm::DbErr> {
        let week_ago = (Utc::now() - Duration::days(7)).timestamp();

        Dream::find()
            .filter(dream::Column::CreatedAt.gte(week_ago))
            .order_by_desc(dream::Column::AverageRating)
            .order_by_desc(dream::Column::TotalRatings)
            .limit(limit)
            .all(db)
            .await
    }
}

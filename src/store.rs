use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{MovieRecord, NewMovie},
};

/// Owns every persisted movie record. Each call is a single auto-committed statement.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> AppResult<Vec<MovieRecord>> {
        let rows = movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(MovieRecord::from).collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<MovieRecord> {
        self.find_model(id).await.map(MovieRecord::from)
    }

    pub async fn create(&self, new: NewMovie) -> AppResult<MovieRecord> {
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(None),
            ranking: Set(new.ranking),
            review: Set(None),
            img_url: Set(new.img_url),
        };

        let created = model.insert(&self.db).await?;
        debug!(id = created.id, title = %created.title, "movie created");
        Ok(created.into())
    }

    pub async fn update(&self, id: i32, rating: f64, review: String) -> AppResult<MovieRecord> {
        let res = movie::Entity::update_many()
            .col_expr(movie::Column::Rating, Expr::value(rating))
            .col_expr(movie::Column::Review, Expr::value(review))
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(not_found(id));
        }
        debug!(id, rating, "movie rated");
        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(not_found(id));
        }
        debug!(id, "movie deleted");
        Ok(())
    }

    async fn find_model(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("movie {id}"))
}

use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    domain::requests::product::FindAllProducts, model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn count_all(&self) -> Result<i64, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        // Total over every row, removed ones included.
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(total)
    }

    async fn find_available(
        &self,
        req: &FindAllProducts,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        info!(
            "🔍 Fetching available products page: {} limit: {}",
            req.page, req.limit
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        // Widen before multiplying; the page number alone can sit at i32::MAX.
        let limit = req.limit as i64;
        let offset = (req.page as i64 - 1).max(0) * limit;

        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT
                product_id,
                name,
                price,
                available,
                created_at,
                updated_at
            FROM products
            WHERE available = TRUE
            ORDER BY product_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }

    async fn find_available_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT
                product_id,
                name,
                price,
                available,
                created_at,
                updated_at
            FROM products
            WHERE product_id = $1 AND available = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching products by IDs: {:?}", ids);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        // No availability filter; existence checks see removed products too.
        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT
                product_id,
                name,
                price,
                available,
                created_at,
                updated_at
            FROM products
            WHERE product_id = ANY($1)
            ORDER BY product_id
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products by IDs: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }
}

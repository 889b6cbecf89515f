use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, price)
            VALUES ($1, $2)
            RETURNING
                product_id,
                name,
                price,
                available,
                created_at,
                updated_at
            "#,
        )
        .bind(&req.name)
        .bind(req.price)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", req.name, err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created product ID {} ({})",
            result.product_id, result.name
        );
        Ok(result)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Single guarded statement; only a currently available row matches.
        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                updated_at = CURRENT_TIMESTAMP
            WHERE product_id = $1 AND available = TRUE
            RETURNING
                product_id,
                name,
                price,
                available,
                created_at,
                updated_at
            "#,
        )
        .bind(req.id)
        .bind(req.name.as_deref())
        .bind(req.price)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {:?}", req.id, err);
            RepositoryError::from(err)
        })?;

        if let Some(product) = &result {
            info!("🔄 Updated product ID {}", product.product_id);
        }
        Ok(result)
    }

    async fn remove_product(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🗑️ Removing product: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET available = FALSE,
                updated_at = CURRENT_TIMESTAMP
            WHERE product_id = $1 AND available = TRUE
            RETURNING
                product_id,
                name,
                price,
                available,
                created_at,
                updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to remove product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        if let Some(product) = &result {
            info!("✅ Product ID {} marked unavailable", product.product_id);
        }
        Ok(result)
    }
}

use crate::{domain::requests::product::FindAllProducts, model::product::Product as ProductModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn count_all(&self) -> Result<i64, RepositoryError>;
    async fn find_available(
        &self,
        req: &FindAllProducts,
    ) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_available_by_id(&self, id: i32)
    -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError>;
}

use crate::domain::{
    requests::product::FindAllProducts,
    response::product::{ProductPageResponse, ProductResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(&self, req: &FindAllProducts) -> Result<ProductPageResponse, ServiceError>;
    async fn find_one(&self, id: i32) -> Result<ProductResponse, ServiceError>;
    async fn validate_products(&self, ids: &[i32]) -> Result<Vec<ProductResponse>, ServiceError>;
}

use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::{
        requests::product::FindAllProducts,
        response::{
            pagination::Pagination,
            product::{ProductPageResponse, ProductResponse},
        },
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::collections::BTreeSet;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository) -> Self {
        Self { query }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self, req: &FindAllProducts) -> Result<ProductPageResponse, ServiceError> {
        info!(
            "🔍 Finding all products | Page: {}, Limit: {}",
            req.page, req.limit
        );

        let page = if req.page > 0 { req.page } else { 1 };
        let limit = if req.limit > 0 { req.limit } else { 10 };

        let normalized = FindAllProducts { page, limit };

        let total = match self.query.count_all().await {
            Ok(total) => total,
            Err(e) => {
                error!("❌ Failed to count products: {e:?}");
                return Err(ServiceError::Repo(e));
            }
        };

        let products = match self.query.find_available(&normalized).await {
            Ok(products) => {
                info!("✅ Retrieved {} products from DB", products.len());
                products
            }
            Err(e) => {
                error!("❌ Failed to fetch all products: {e:?}");
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        // last_page rounds the raw total up; an empty table yields 0 pages.
        let last_page = (total + limit as i64 - 1) / limit as i64;

        // total_pages carries the raw row count, available or not.
        let meta = Pagination {
            page,
            total_pages: total,
            last_page,
        };

        info!("✅ Found {} products (total: {total})", data.len());

        Ok(ProductPageResponse { data, meta })
    }

    async fn find_one(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        info!("🔍 Finding product by ID: {id}");

        match self.query.find_available_by_id(id).await {
            Ok(Some(product)) => {
                info!("✅ Product found: {id}");
                Ok(ProductResponse::from(product))
            }
            Ok(None) => {
                error!("❌ Product with id {id} not found");
                Err(ServiceError::NotFound(format!(
                    "Product with id {id} not found"
                )))
            }
            Err(e) => {
                error!("❌ Failed to fetch product {id}: {e:?}");
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn validate_products(&self, ids: &[i32]) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("🔍 Validating {} product IDs", ids.len());

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // Duplicate ids count once against the existence check.
        let unique: Vec<i32> = ids
            .iter()
            .copied()
            .collect::<BTreeSet<i32>>()
            .into_iter()
            .collect();

        let products = match self.query.find_by_ids(&unique).await {
            Ok(products) => products,
            Err(e) => {
                error!("❌ Failed to fetch products by IDs: {e:?}");
                return Err(ServiceError::Repo(e));
            }
        };

        if products.len() != unique.len() {
            error!(
                "❌ Product validation failed: requested {} unique IDs, found {}",
                unique.len(),
                products.len()
            );
            return Err(ServiceError::BadRequest("Invalid product ids".to_string()));
        }

        info!("✅ Validated {} products", products.len());

        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}

use crate::{
    abstract_trait::product::{
        repository::DynProductCommandRepository, service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandService {
    pub command: DynProductCommandRepository,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository) -> Self {
        Self { command }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🏗️ Creating product: {}", req.name);

        let product = match self.command.create_product(req).await {
            Ok(model) => model,
            Err(err) => {
                error!("❌ Failed to create product '{}': {err:?}", req.name);
                return Err(ServiceError::Repo(err));
            }
        };

        let response = ProductResponse::from(product);

        info!(
            "✅ Product created successfully: {} (ID: {})",
            response.name, response.id,
        );

        Ok(response)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("✏️ Updating product with ID: {}", req.id);

        let product = match self.command.update_product(req).await {
            Ok(Some(model)) => model,
            Ok(None) => {
                error!("❌ Product with id {} not found", req.id);
                return Err(ServiceError::NotFound(format!(
                    "Product with id {} not found",
                    req.id
                )));
            }
            Err(err) => {
                error!("❌ Failed to update product ID {}: {err:?}", req.id);
                return Err(ServiceError::Repo(err));
            }
        };

        let response = ProductResponse::from(product);

        info!("✅ Product updated successfully: {}", response.id);

        Ok(response)
    }

    async fn remove_product(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        info!("🗑️ Removing product with ID: {id}");

        let product = match self.command.remove_product(id).await {
            Ok(Some(model)) => model,
            Ok(None) => {
                error!("❌ Product with id {id} not found");
                return Err(ServiceError::NotFound(format!(
                    "Product with id {id} not found"
                )));
            }
            Err(err) => {
                error!("❌ Failed to remove product ID {id}: {err:?}");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = ProductResponse::from(product);

        info!("✅ Product removed successfully: {}", response.id);

        Ok(response)
    }
}

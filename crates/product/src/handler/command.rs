use crate::{
    abstract_trait::product::service::DynProductCommandService,
    domain::requests::product::{
        CreateProductRequest as DomainCreateProductRequest,
        UpdateProductRequest as DomainUpdateProductRequest,
    },
};
use genproto::product::{
    CreateProductRequest, FindByIdProductRequest, ProductResponse, UpdateProductRequest,
    product_command_service_server::ProductCommandService,
};
use shared::{
    errors::{AppErrorGrpc, ServiceError},
    utils::format_validation_errors,
};
use tonic::{Request, Response, Status};
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct ProductCommandServiceImpl {
    pub command: DynProductCommandService,
}

impl ProductCommandServiceImpl {
    pub fn new(command: DynProductCommandService) -> Self {
        Self { command }
    }
}

#[tonic::async_trait]
impl ProductCommandService for ProductCommandServiceImpl {
    async fn create(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        info!("Creating new Product");

        let req = request.into_inner();

        let domain_req = DomainCreateProductRequest {
            name: req.name,
            price: req.price,
        };

        domain_req.validate().map_err(|e| {
            AppErrorGrpc::from(ServiceError::Validation(format_validation_errors(&e)))
        })?;

        let product = self
            .command
            .create_product(&domain_req)
            .await
            .map_err(AppErrorGrpc::from)?;

        info!("Product created successfully with ID: {}", product.id);

        Ok(Response::new(product.into()))
    }

    async fn update(
        &self,
        request: Request<UpdateProductRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        info!("Updating Product");

        let req = request.into_inner();

        // The id only selects the row. Absent fields stay untouched.
        let domain_req = DomainUpdateProductRequest {
            id: req.id,
            name: req.name,
            price: req.price,
        };

        domain_req.validate().map_err(|e| {
            AppErrorGrpc::from(ServiceError::Validation(format_validation_errors(&e)))
        })?;

        let product = self
            .command
            .update_product(&domain_req)
            .await
            .map_err(AppErrorGrpc::from)?;

        info!("Product updated successfully: ID={}", req.id);

        Ok(Response::new(product.into()))
    }

    async fn remove(
        &self,
        request: Request<FindByIdProductRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        info!("Soft deleting Product");

        let req = request.into_inner();

        let product = self
            .command
            .remove_product(req.id)
            .await
            .map_err(AppErrorGrpc::from)?;

        info!("Product soft deleted: ID={}", req.id);

        Ok(Response::new(product.into()))
    }
}

use crate::{
    abstract_trait::product::service::DynProductQueryService,
    domain::requests::product::FindAllProducts,
};
use genproto::product::{
    FindAllProductRequest, FindAllProductResponse, FindByIdProductRequest, ProductResponse,
    ValidateProductsRequest, ValidateProductsResponse,
    product_query_service_server::ProductQueryService,
};
use shared::{
    errors::{AppErrorGrpc, ServiceError},
    utils::format_validation_errors,
};
use tonic::{Request, Response, Status};
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct ProductQueryServiceImpl {
    pub query: DynProductQueryService,
}

impl ProductQueryServiceImpl {
    pub fn new(query: DynProductQueryService) -> Self {
        Self { query }
    }
}

#[tonic::async_trait]
impl ProductQueryService for ProductQueryServiceImpl {
    async fn find_all(
        &self,
        request: Request<FindAllProductRequest>,
    ) -> Result<Response<FindAllProductResponse>, Status> {
        info!("Handling gRPC request: FindAll Products");

        let req = request.into_inner();

        let domain_req = FindAllProducts {
            page: req.page,
            limit: req.limit,
        };

        domain_req.validate().map_err(|e| {
            AppErrorGrpc::from(ServiceError::Validation(format_validation_errors(&e)))
        })?;

        let page = self
            .query
            .find_all(&domain_req)
            .await
            .map_err(AppErrorGrpc::from)?;

        let len = page.data.len();

        let reply = FindAllProductResponse::from(page);

        info!("Successfully fetched {} Products", len);

        Ok(Response::new(reply))
    }

    async fn find_one(
        &self,
        request: Request<FindByIdProductRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        info!("Handling gRPC request: Find Product by ID");

        let req = request.into_inner();

        let product = self
            .query
            .find_one(req.id)
            .await
            .map_err(AppErrorGrpc::from)?;

        info!("Successfully fetched Product with ID: {}", req.id);

        Ok(Response::new(product.into()))
    }

    async fn validate_products(
        &self,
        request: Request<ValidateProductsRequest>,
    ) -> Result<Response<ValidateProductsResponse>, Status> {
        info!("Handling gRPC request: Validate Products");

        let req = request.into_inner();

        let products = self
            .query
            .validate_products(&req.ids)
            .await
            .map_err(AppErrorGrpc::from)?;

        let reply = ValidateProductsResponse {
            data: products.into_iter().map(|item| item.into()).collect(),
        };

        info!("Successfully validated {} Products", reply.data.len());

        Ok(Response::new(reply))
    }
}

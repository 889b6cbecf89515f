use async_trait::async_trait;
use chrono::Utc;
use product::{
    abstract_trait::product::{
        repository::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
        service::{ProductCommandServiceTrait, ProductQueryServiceTrait},
    },
    domain::requests::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
    model::product::Product as ProductModel,
    service::{command::ProductCommandService, query::ProductQueryService},
};
use shared::errors::{RepositoryError, ServiceError};
use std::sync::{Arc, Mutex};
use validator::Validate;

// In-memory stand-in for the products table. Mirrors the SQL the real
// repositories issue: unfiltered counts, id-ordered available pages, and
// guarded conditional mutations.
#[derive(Default)]
struct FakeProductRepository {
    rows: Mutex<Vec<ProductModel>>,
    fail: Mutex<bool>,
}

impl FakeProductRepository {
    fn seed(&self, id: i32, name: &str, price: f64, available: bool) {
        self.rows.lock().unwrap().push(ProductModel {
            product_id: id,
            name: name.to_string(),
            price,
            available,
            created_at: Some(Utc::now().naive_utc()),
            updated_at: None,
        });
    }

    fn break_storage(&self) {
        *self.fail.lock().unwrap() = true;
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if *self.fail.lock().unwrap() {
            return Err(RepositoryError::Custom("storage offline".to_string()));
        }
        Ok(())
    }

    fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for FakeProductRepository {
    async fn count_all(&self) -> Result<i64, RepositoryError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn find_available(
        &self,
        req: &FindAllProducts,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        self.check()?;
        let offset = ((req.page as i64 - 1).max(0) * req.limit as i64) as usize;
        let mut available: Vec<ProductModel> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.available)
            .cloned()
            .collect();
        available.sort_by_key(|r| r.product_id);
        Ok(available
            .into_iter()
            .skip(offset)
            .take(req.limit as usize)
            .collect())
    }

    async fn find_available_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.product_id == id && r.available)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError> {
        self.check()?;
        let mut found: Vec<ProductModel> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| ids.contains(&r.product_id))
            .cloned()
            .collect();
        found.sort_by_key(|r| r.product_id);
        Ok(found)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for FakeProductRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let next_id = rows.iter().map(|r| r.product_id).max().unwrap_or(0) + 1;
        let product = ProductModel {
            product_id: next_id,
            name: req.name.clone(),
            price: req.price,
            available: true,
            created_at: Some(Utc::now().naive_utc()),
            updated_at: None,
        };
        rows.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.product_id == req.id && r.available);
        Ok(row.map(|r| {
            if let Some(name) = &req.name {
                r.name = name.clone();
            }
            if let Some(price) = req.price {
                r.price = price;
            }
            r.updated_at = Some(Utc::now().naive_utc());
            r.clone()
        }))
    }

    async fn remove_product(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|r| r.product_id == id && r.available);
        Ok(row.map(|r| {
            r.available = false;
            r.updated_at = Some(Utc::now().naive_utc());
            r.clone()
        }))
    }
}

fn services(
    repo: Arc<FakeProductRepository>,
) -> (ProductQueryService, ProductCommandService) {
    (
        ProductQueryService::new(repo.clone()),
        ProductCommandService::new(repo),
    )
}

fn page_request(page: i32, limit: i32) -> FindAllProducts {
    FindAllProducts { page, limit }
}

#[tokio::test]
async fn create_returns_available_product_with_fresh_id() {
    let repo = Arc::new(FakeProductRepository::default());
    let (_, command) = services(repo.clone());

    let first = command
        .create_product(&CreateProductRequest {
            name: "Desk".to_string(),
            price: 120.0,
        })
        .await
        .unwrap();
    let second = command
        .create_product(&CreateProductRequest {
            name: "Chair".to_string(),
            price: 60.0,
        })
        .await
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(first.available);
    assert!(second.available);
    assert_eq!(second.name, "Chair");
}

#[tokio::test]
async fn find_all_reports_raw_total_but_only_available_rows() {
    let repo = Arc::new(FakeProductRepository::default());
    repo.seed(1, "Desk", 120.0, true);
    repo.seed(2, "Chair", 60.0, false);
    repo.seed(3, "Lamp", 25.0, true);
    repo.seed(4, "Rug", 45.0, false);
    repo.seed(5, "Shelf", 80.0, true);
    let (query, _) = services(repo);

    let page = query.find_all(&page_request(1, 10)).await.unwrap();

    let ids: Vec<i32> = page.data.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3, 5]);
    // The total counts every row, removed ones included.
    assert_eq!(page.meta.total_pages, 5);
    assert_eq!(page.meta.last_page, 1);
    assert_eq!(page.meta.page, 1);
}

#[tokio::test]
async fn find_all_pages_in_id_order() {
    let repo = Arc::new(FakeProductRepository::default());
    for id in 1..=5 {
        repo.seed(id, &format!("Item {id}"), id as f64, true);
    }
    let (query, _) = services(repo);

    let page = query.find_all(&page_request(2, 2)).await.unwrap();

    let ids: Vec<i32> = page.data.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 4]);
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.total_pages, 5);
    assert_eq!(page.meta.last_page, 3);
}

#[tokio::test]
async fn find_all_returns_an_empty_page_far_past_the_data() {
    let repo = Arc::new(FakeProductRepository::default());
    repo.seed(1, "Desk", 120.0, true);
    repo.seed(2, "Chair", 60.0, true);
    let (query, _) = services(repo);

    // The largest page number the request shape admits lands past the
    // last row, never in a wrapped offset.
    let request = page_request(i32::MAX, 2);
    assert!(request.validate().is_ok());

    let page = query.find_all(&request).await.unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.meta.page, i32::MAX);
    assert_eq!(page.meta.total_pages, 2);
    assert_eq!(page.meta.last_page, 1);
}

#[tokio::test]
async fn find_all_on_empty_store_reports_zero_pages() {
    let repo = Arc::new(FakeProductRepository::default());
    let (query, _) = services(repo);

    let page = query.find_all(&page_request(1, 10)).await.unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.meta.total_pages, 0);
    assert_eq!(page.meta.last_page, 0);
}

#[tokio::test]
async fn find_all_clamps_non_positive_page_and_limit() {
    let repo = Arc::new(FakeProductRepository::default());
    repo.seed(1, "Desk", 120.0, true);
    let (query, _) = services(repo);

    let page = query.find_all(&page_request(0, 0)).await.unwrap();

    assert_eq!(page.meta.page, 1);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.meta.last_page, 1);
}

#[tokio::test]
async fn find_one_returns_only_available_products() {
    let repo = Arc::new(FakeProductRepository::default());
    repo.seed(1, "Desk", 120.0, true);
    repo.seed(2, "Chair", 60.0, false);
    let (query, _) = services(repo);

    let found = query.find_one(1).await.unwrap();
    assert_eq!(found.name, "Desk");

    match query.find_one(2).await {
        Err(ServiceError::NotFound(msg)) => {
            assert_eq!(msg, "Product with id 2 not found");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }

    match query.find_one(99).await {
        Err(ServiceError::NotFound(msg)) => {
            assert_eq!(msg, "Product with id 99 not found");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn update_patches_only_the_provided_fields() {
    let repo = Arc::new(FakeProductRepository::default());
    repo.seed(1, "Desk", 120.0, true);
    let (_, command) = services(repo);

    let patched = command
        .update_product(&UpdateProductRequest {
            id: 1,
            name: None,
            price: Some(99.5),
        })
        .await
        .unwrap();
    assert_eq!(patched.name, "Desk");
    assert_eq!(patched.price, 99.5);
    assert!(patched.updated_at.is_some());

    let patched = command
        .update_product(&UpdateProductRequest {
            id: 1,
            name: Some("Standing desk".to_string()),
            price: None,
        })
        .await
        .unwrap();
    assert_eq!(patched.name, "Standing desk");
    assert_eq!(patched.price, 99.5);
    assert_eq!(patched.id, 1);
}

#[tokio::test]
async fn update_rejects_missing_or_removed_products() {
    let repo = Arc::new(FakeProductRepository::default());
    repo.seed(1, "Desk", 120.0, false);
    let (_, command) = services(repo);

    let patch = UpdateProductRequest {
        id: 1,
        name: Some("Standing desk".to_string()),
        price: None,
    };

    match command.update_product(&patch).await {
        Err(ServiceError::NotFound(msg)) => {
            assert_eq!(msg, "Product with id 1 not found");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }

    let patch = UpdateProductRequest {
        id: 7,
        name: None,
        price: Some(1.0),
    };

    match command.update_product(&patch).await {
        Err(ServiceError::NotFound(msg)) => {
            assert_eq!(msg, "Product with id 7 not found");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn remove_soft_deletes_and_is_not_repeatable() {
    let repo = Arc::new(FakeProductRepository::default());
    repo.seed(1, "Desk", 120.0, true);
    let (query, command) = services(repo.clone());

    let removed = command.remove_product(1).await.unwrap();
    assert!(!removed.available);

    // The row stays in storage; only the flag flips.
    assert_eq!(repo.row_count(), 1);

    match query.find_one(1).await {
        Err(ServiceError::NotFound(msg)) => {
            assert_eq!(msg, "Product with id 1 not found");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }

    match command.remove_product(1).await {
        Err(ServiceError::NotFound(msg)) => {
            assert_eq!(msg, "Product with id 1 not found");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn validate_products_deduplicates_and_ignores_availability() {
    let repo = Arc::new(FakeProductRepository::default());
    repo.seed(1, "Desk", 120.0, true);
    repo.seed(2, "Chair", 60.0, true);
    repo.seed(3, "Lamp", 25.0, false);
    let (query, _) = services(repo);

    let validated = query.validate_products(&[1, 1, 3]).await.unwrap();

    let ids: Vec<i32> = validated.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(!validated[1].available);
}

#[tokio::test]
async fn validate_products_rejects_unknown_ids() {
    let repo = Arc::new(FakeProductRepository::default());
    repo.seed(1, "Desk", 120.0, true);
    repo.seed(2, "Chair", 60.0, true);
    repo.seed(3, "Lamp", 25.0, true);
    let (query, _) = services(repo);

    match query.validate_products(&[1, 2, 4]).await {
        Err(ServiceError::BadRequest(msg)) => {
            assert_eq!(msg, "Invalid product ids");
        }
        other => panic!("expected BadRequest, got {other:?}"),
    }
}

#[tokio::test]
async fn validate_products_accepts_an_empty_id_list() {
    let repo = Arc::new(FakeProductRepository::default());
    let (query, _) = services(repo);

    let validated = query.validate_products(&[]).await.unwrap();

    assert!(validated.is_empty());
}

#[tokio::test]
async fn storage_failures_propagate_as_repository_errors() {
    let repo = Arc::new(FakeProductRepository::default());
    repo.seed(1, "Desk", 120.0, true);
    repo.break_storage();
    let (query, command) = services(repo);

    assert!(matches!(
        query.find_all(&page_request(1, 10)).await,
        Err(ServiceError::Repo(_))
    ));
    assert!(matches!(
        query.find_one(1).await,
        Err(ServiceError::Repo(_))
    ));
    assert!(matches!(
        command
            .create_product(&CreateProductRequest {
                name: "Desk".to_string(),
                price: 1.0,
            })
            .await,
        Err(ServiceError::Repo(_))
    ));
    assert!(matches!(
        command.remove_product(1).await,
        Err(ServiceError::Repo(_))
    ));
}

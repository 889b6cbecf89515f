use crate::domain::response::pagination::Pagination;
use crate::model::product::Product as ProductModel;

use genproto::product::{
    FindAllProductResponse as FindAllProductResponseProto, ProductResponse as ProductResponseProto,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub available: bool,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at")]
    pub updated_at: Option<String>,
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.product_id,
            name: value.name,
            price: value.price,
            available: value.available,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

impl From<ProductResponse> for ProductResponseProto {
    fn from(value: ProductResponse) -> Self {
        ProductResponseProto {
            id: value.id,
            name: value.name,
            price: value.price,
            available: value.available,
            created_at: value.created_at.unwrap_or_default(),
            updated_at: value.updated_at.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPageResponse {
    pub data: Vec<ProductResponse>,
    pub meta: Pagination,
}

impl From<ProductPageResponse> for FindAllProductResponseProto {
    fn from(value: ProductPageResponse) -> Self {
        FindAllProductResponseProto {
            data: value.data.into_iter().map(|item| item.into()).collect(),
            meta: Some(value.meta.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_model() -> ProductModel {
        ProductModel {
            product_id: 4,
            name: "Mechanical keyboard".to_string(),
            price: 129.99,
            available: true,
            created_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0),
            updated_at: None,
        }
    }

    #[test]
    fn model_converts_to_response() {
        let response = ProductResponse::from(sample_model());

        assert_eq!(response.id, 4);
        assert_eq!(response.name, "Mechanical keyboard");
        assert!(response.available);
        assert_eq!(response.created_at.as_deref(), Some("2024-03-01 09:30:00"));
        assert_eq!(response.updated_at, None);
    }

    #[test]
    fn response_converts_to_proto_with_empty_strings_for_missing_timestamps() {
        let proto = ProductResponseProto::from(ProductResponse::from(sample_model()));

        assert_eq!(proto.id, 4);
        assert_eq!(proto.price, 129.99);
        assert!(proto.available);
        assert_eq!(proto.updated_at, "");
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    pub page: i32,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "Limit must be a positive integer"))]
    pub limit: i32,
}

fn default_page() -> i32 {
    1
}

fn default_limit() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
}

// The id only selects the record to patch; it is never part of the patch
// itself.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    pub id: i32,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn find_all_defaults_apply_when_fields_are_missing() {
        let req: FindAllProducts = serde_json::from_str("{}").unwrap();

        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn find_all_rejects_non_positive_page_and_limit() {
        let req = FindAllProducts { page: 0, limit: 10 };
        assert!(req.validate().is_err());

        let req = FindAllProducts { page: 1, limit: 0 };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_rejects_empty_name_and_negative_price() {
        let req = CreateProductRequest {
            name: String::new(),
            price: 10.0,
        };
        assert!(req.validate().is_err());

        let req = CreateProductRequest {
            name: "Keyboard".to_string(),
            price: -1.0,
        };
        assert!(req.validate().is_err());

        let req = CreateProductRequest {
            name: "Keyboard".to_string(),
            price: 0.0,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_skips_rules_for_absent_fields() {
        let req = UpdateProductRequest {
            id: 1,
            name: None,
            price: None,
        };
        assert!(req.validate().is_ok());

        let req = UpdateProductRequest {
            id: 1,
            name: Some(String::new()),
            price: None,
        };
        assert!(req.validate().is_err());

        let req = UpdateProductRequest {
            id: 1,
            name: None,
            price: Some(-0.5),
        };
        assert!(req.validate().is_err());
    }
}

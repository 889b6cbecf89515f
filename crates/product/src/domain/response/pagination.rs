use genproto::product::Pagination as PaginationProto;
use serde::{Deserialize, Serialize};

// `total_pages` carries the raw record count of the whole table, not a page
// count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i32,

    #[serde(rename = "totalPages")]
    pub total_pages: i64,

    #[serde(rename = "lastPage")]
    pub last_page: i64,
}

impl From<Pagination> for PaginationProto {
    fn from(value: Pagination) -> Self {
        PaginationProto {
            page: value.page,
            total_pages: value.total_pages,
            last_page: value.last_page,
        }
    }
}

use crate::errors::{repository::RepositoryError, service::ServiceError};
use thiserror::Error;
use tonic::Status;

#[derive(Debug, Error)]
pub enum AppErrorGrpc {
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

impl From<AppErrorGrpc> for Status {
    fn from(err: AppErrorGrpc) -> Self {
        match err {
            AppErrorGrpc::Service(service_err) => match service_err {
                ServiceError::NotFound(msg) => Status::not_found(msg),

                ServiceError::BadRequest(msg) => Status::invalid_argument(msg),

                ServiceError::Validation(errors) => {
                    Status::invalid_argument(format!("Validation failed: {}", errors.join("; ")))
                }

                ServiceError::Repo(repo_err) => match repo_err {
                    RepositoryError::Sqlx(_) => Status::internal("Database error"),
                    RepositoryError::Custom(msg) => Status::internal(msg),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn not_found_maps_to_not_found_status_with_message() {
        let err = AppErrorGrpc::Service(ServiceError::NotFound(
            "Product with id 7 not found".to_string(),
        ));
        let status = Status::from(err);

        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "Product with id 7 not found");
    }

    #[test]
    fn bad_request_maps_to_invalid_argument() {
        let err = AppErrorGrpc::Service(ServiceError::BadRequest("Invalid product ids".to_string()));
        let status = Status::from(err);

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "Invalid product ids");
    }

    #[test]
    fn validation_errors_map_to_invalid_argument() {
        let err = AppErrorGrpc::Service(ServiceError::Validation(vec![
            "name: Name is required".to_string(),
            "price: Price must not be negative".to_string(),
        ]));
        let status = Status::from(err);

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(
            status.message(),
            "Validation failed: name: Name is required; price: Price must not be negative"
        );
    }

    #[test]
    fn sqlx_failure_maps_to_internal_without_details() {
        let err = AppErrorGrpc::Service(ServiceError::Repo(RepositoryError::Sqlx(
            sqlx::Error::PoolTimedOut,
        )));
        let status = Status::from(err);

        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "Database error");
    }
}

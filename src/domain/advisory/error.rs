use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum AdvisoryServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl From<AdvisoryServiceError> for AppError {
    fn from(err: AdvisoryServiceError) -> Self {
        match err {
            AdvisoryServiceError::Dependency(msg) => AppError::ExternalService(msg),
            AdvisoryServiceError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
        }
    }
}

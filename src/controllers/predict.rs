use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    domain::{
        advisory::{AdvisoryQuery, AdvisoryServiceApi, ImageAttachment, PredictResponse},
        tts::LanguageCode,
    },
    error::{AppError, AppResult},
};

pub struct PredictController {
    advisory_service: Arc<dyn AdvisoryServiceApi>,
}

impl PredictController {
    pub fn new(advisory_service: Arc<dyn AdvisoryServiceApi>) -> Self {
        Self { advisory_service }
    }

    /// POST /predict - Answer a farmer's question, optionally about a photo
    ///
    /// Multipart fields: `text`, `file` (image), `language` (`en`, `hi`, `te`)
    pub async fn predict(
        State(controller): State<Arc<PredictController>>,
        multipart: Multipart,
    ) -> AppResult<Json<PredictResponse>> {
        let query = read_query(multipart).await?;

        let answer = controller
            .advisory_service
            .answer(query)
            .await
            .map_err(AppError::from)?;

        Ok(Json(PredictResponse::from(answer)))
    }
}

async fn read_query(mut multipart: Multipart) -> AppResult<AdvisoryQuery> {
    let mut text = String::new();
    let mut language = LanguageCode::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "text" => text = field.text().await.map_err(multipart_error)?,
            "language" => {
                language = LanguageCode::from_selector(&field.text().await.map_err(multipart_error)?)
            }
            "file" => {
                let has_file_name = field.file_name().is_some_and(|n| !n.is_empty());
                let data = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty `file` part when nothing was picked
                if !has_file_name || data.is_empty() {
                    continue;
                }

                image = Some(ImageAttachment::from_bytes(data.to_vec()).ok_or_else(|| {
                    AppError::BadRequest(
                        "Unsupported image format. Upload a JPEG, PNG, GIF or WEBP image.".to_string(),
                    )
                })?);
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    Ok(AdvisoryQuery {
        text,
        image,
        language,
    })
}

fn multipart_error(err: MultipartError) -> AppError {
    multipart_error_for(err.status(), err.body_text())
}

fn multipart_error_for(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else if status.is_server_error() {
        AppError::Internal(format!("Failed to read form data: {}", message))
    } else {
        AppError::BadRequest(format!("Malformed form data: {}", message))
    }
}

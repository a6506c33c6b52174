use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    domain::conversion::{
        AudioDelivery, AudioPayload, ConversionRequest, ConversionResponse, ConversionService,
        ConversionServiceApi, StorageBackend, UploadedFile,
    },
    error::{AppError, AppResult},
    infrastructure::http::RequestId,
};

pub struct ConversionController {
    conversion_service: Arc<ConversionService>,
}

impl ConversionController {
    pub fn new(conversion_service: Arc<ConversionService>) -> Self {
        Self { conversion_service }
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.conversion_service.storage_backend()
    }

    /// POST /api/convert - Translate text and synthesize it as speech
    pub async fn convert(
        State(controller): State<Arc<ConversionController>>,
        Extension(request_id): Extension<RequestId>,
        multipart: Multipart,
    ) -> AppResult<(StatusCode, Json<ConversionResponse>)> {
        let request = read_conversion_form(multipart).await?;

        tracing::debug!(
            request_id = %request_id.0,
            has_upload = request.upload.is_some(),
            "Conversion form received"
        );

        let outcome = controller.conversion_service.convert(request).await?;

        Ok((StatusCode::CREATED, Json(ConversionResponse::from(outcome))))
    }

    /// GET /play/:audio_id - Stream stored audio inline
    pub async fn play(
        State(controller): State<Arc<ConversionController>>,
        Path(audio_id): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let payload = controller
            .conversion_service
            .fetch_audio(&audio_id, AudioDelivery::Inline)
            .await?;

        audio_response(payload)
    }

    /// GET /download/:audio_id - Serve stored audio as an attachment
    pub async fn download(
        State(controller): State<Arc<ConversionController>>,
        Path(audio_id): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let payload = controller
            .conversion_service
            .fetch_audio(&audio_id, AudioDelivery::Attachment)
            .await?;

        audio_response(payload)
    }
}

/// Collect the `text`, `language` and `file` fields of the conversion form
async fn read_conversion_form(mut multipart: Multipart) -> AppResult<ConversionRequest> {
    let mut request = ConversionRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "text" => request.text = Some(field.text().await.map_err(multipart_error)?),
            "language" => {
                request.target_language = Some(field.text().await.map_err(multipart_error)?)
            }
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty part when no file was chosen
                if file_name.is_empty() && content.is_empty() {
                    continue;
                }

                request.upload = Some(UploadedFile {
                    file_name,
                    content: content.to_vec(),
                });
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    Ok(request)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

fn audio_response(payload: AudioPayload) -> AppResult<(StatusCode, HeaderMap, Body)> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(payload.content_type),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&payload.content_disposition)
            .map_err(|e| AppError::Internal(e.to_string()))?,
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(payload.audio.len()));

    Ok((StatusCode::OK, headers, Body::from(payload.audio)))
}

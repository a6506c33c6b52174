use axum::Json;

use crate::domain::language::LanguageResponse;

/// GET /api/languages - List every selectable destination language
pub async fn list_languages() -> Json<Vec<LanguageResponse>> {
    Json(LanguageResponse::from_catalog())
}

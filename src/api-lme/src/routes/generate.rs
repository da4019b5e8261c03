use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use core_lme::export::{JsonContentSource, OutputFile, Settings, delete_manifest, generate, parse_output_files};

use crate::AppState;
use crate::errors::{DeleteError, GenerateError};

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratePayload {
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Files actually written, in request order.
    pub files: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// POST /api/generate - Run one generation pass for the requested files
///
/// The file selection is validated before any selection/render work; an
/// invalid or empty selection is a 400 with no partial writes.
pub async fn post_generate(
    State(state): State<AppState>,
    Json(payload): Json<GeneratePayload>,
) -> Result<impl IntoResponse, GenerateError> {
    if payload.files.is_empty() {
        return Err(GenerateError::InvalidFiles("no files requested".to_string()));
    }
    let files = parse_output_files(&payload.files).map_err(|e| GenerateError::InvalidFiles(e.to_string()))?;

    let mut settings = Settings::load(&state.settings_path).map_err(|e| GenerateError::Failure(e.to_string()))?;

    // Remember the selection for next time; losing it is not worth failing
    // the run over.
    settings.files_to_generate = files.iter().map(|f| f.file_name().to_string()).collect();
    if let Err(e) = settings.save(&state.settings_path) {
        tracing::warn!("could not persist last-used file selection: {e}");
    }

    let source = JsonContentSource::load(&state.content_path).map_err(|e| GenerateError::Failure(e.to_string()))?;

    let report = generate(&settings, &source, &state.out_dir, &files)
        .await
        .map_err(|e| GenerateError::Failure(e.to_string()))?;

    Ok((
        StatusCode::OK,
        Json(GenerateResponse {
            files: report.written.iter().map(|f| f.file_name().to_string()).collect(),
            notes: report.notes,
        }),
    ))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: String,
    /// Whether a file was actually on disk.
    pub existed: bool,
}

/// POST /api/delete/{file} - Remove one generated manifest
pub async fn post_delete(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, DeleteError> {
    let file = OutputFile::parse(&file).map_err(|e| DeleteError::InvalidFile(e.to_string()))?;
    let existed = delete_manifest(&state.out_dir, file)
        .await
        .map_err(|e| DeleteError::Failure(e.to_string()))?;
    Ok(Json(DeleteResponse {
        deleted: file.file_name().to_string(),
        existed,
    }))
}

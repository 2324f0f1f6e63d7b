use axum::extract::{Multipart, State};
use axum::Json;
use tracing::warn;

use gachalog_application::commands::upload_commands::{self, UploadRequest};
use gachalog_application::AppState;
use gachalog_domain::UploadReceipt;

use crate::error::HttpError;
use crate::middleware::maybe_gunzip;

pub async fn upload_history(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadReceipt>, HttpError> {
    let mut file: Option<Vec<u8>> = None;
    let mut token = String::new();
    let mut uid = String::new();
    let mut game = String::new();

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        warn!("failed to read upload form: {}", err);
        HttpError::BadRequest(err.to_string())
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| HttpError::BadRequest(err.to_string()))?;
                file = Some(bytes.to_vec());
            }
            "token" | "uid" | "game" => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| HttpError::BadRequest(err.to_string()))?;
                match name.as_str() {
                    "token" => token = value,
                    "uid" => uid = value,
                    _ => game = value,
                }
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| HttpError::BadRequest("file is required".to_string()))?;
    let content = maybe_gunzip(file, state.config.max_body_bytes).map_err(|err| {
        warn!("failed to inflate upload: {}", err);
        HttpError::BadRequest(err.to_string())
    })?;

    let receipt = upload_commands::upload_history(
        &state,
        UploadRequest {
            token,
            uid,
            game,
            content,
        },
    )
    .await?;
    Ok(Json(receipt))
}

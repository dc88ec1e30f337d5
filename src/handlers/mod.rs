use axum::extract::Multipart;

use crate::error::ApiError;

pub mod albums;
pub mod artists;
pub mod auth;
pub mod genres;
pub mod labels;
pub mod producers;

/// Parse a path id, mapping malformed input to a 400
pub(crate) fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::bad_request("Invalid id format"))
}

/// Entity JSON plus the optional `foto2` image from a multipart create body
#[derive(Debug)]
pub(crate) struct UploadPayload {
    pub json: String,
    pub image: Option<(String, Vec<u8>)>,
}

/// Read a create body: one JSON part named after the resource (`disco`,
/// `artista`, ...) and an optional `foto2` file part. Unknown parts are
/// ignored.
pub(crate) async fn read_entity_multipart(
    mut multipart: Multipart,
    entity_part: &'static str,
) -> Result<UploadPayload, ApiError> {
    let mut json: Option<String> = None;
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed multipart body"))?
    {
        match field.name() {
            Some(name) if name == entity_part => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| ApiError::bad_request("Unreadable entity part"))?;
                json = Some(text);
            }
            Some("foto2") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::bad_request("Unreadable image part"))?;
                if !bytes.is_empty() {
                    image = Some((filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    let json = json
        .ok_or_else(|| ApiError::bad_request(format!("Missing required part '{}'", entity_part)))?;

    Ok(UploadPayload { json, image })
}

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::middleware::error::{AppError, AppResult};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
pub const DEFAULT_FILE_NAME: &str = "submission";

pub fn sanitize_filename(file_name: &str) -> String {
    let bad_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\r', '\n'];
    let mut result = file_name.trim().to_owned();
    for &ch in &bad_chars {
        result = result.replace(ch, "_");
    }
    if result.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        result
    }
}

#[derive(Debug, PartialEq)]
pub struct DecodedFile {
    pub content_type: String,
    pub data: Vec<u8>,
}

fn content_type_for(file_name: Option<&str>) -> &'static str {
    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("zip") => "application/zip",
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => DEFAULT_CONTENT_TYPE,
    }
}

fn decode_base64(payload: &str) -> AppResult<Vec<u8>> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact).map_err(|e| AppError::Validation {
        description: format!("file is not valid base64 - {e}"),
    })
}

/// Decodes `data:<mime>;base64,<payload>` or a bare base64 payload.
pub fn decode_data_uri(raw: &str) -> AppResult<DecodedFile> {
    let raw = raw.trim();
    let Some(rest) = raw.strip_prefix("data:") else {
        return Ok(DecodedFile {
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            data: decode_base64(raw)?,
        });
    };

    let (header, payload) = rest.split_once(',').ok_or(AppError::Validation {
        description: "data uri has no payload".to_string(),
    })?;
    let mut params = header.split(';');
    let content_type = params
        .next()
        .map(str::trim)
        .filter(|mime| !mime.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let data = if is_base64 {
        decode_base64(payload)?
    } else {
        payload.as_bytes().to_vec()
    };
    Ok(DecodedFile { content_type, data })
}

/// Checks an uploaded payload and returns it as a data uri with a content type,
/// plus the decoded size in bytes.
pub fn normalize_upload(raw: &str, file_name: Option<&str>) -> AppResult<(String, usize)> {
    let decoded = decode_data_uri(raw)?;
    if decoded.data.is_empty() {
        return Err(AppError::Validation {
            description: "file is empty".to_string(),
        });
    }
    let content_type = if decoded.content_type == DEFAULT_CONTENT_TYPE {
        content_type_for(file_name).to_string()
    } else {
        decoded.content_type
    };
    let encoded = STANDARD.encode(&decoded.data);
    Ok((format!("data:{content_type};base64,{encoded}"), decoded.data.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_data_uri_with_content_type() {
        let decoded = decode_data_uri("data:application/pdf;base64,aGVsbG8=").unwrap();
        assert_eq!(decoded.content_type, "application/pdf");
        assert_eq!(decoded.data, b"hello");
    }

    #[test]
    fn bare_base64_is_octet_stream() {
        let decoded = decode_data_uri("aGVs\nbG8=").unwrap();
        assert_eq!(decoded.content_type, DEFAULT_CONTENT_TYPE);
        assert_eq!(decoded.data, b"hello");
    }

    #[test]
    fn rejects_broken_payloads() {
        assert!(decode_data_uri("data:text/plain;base64").is_err());
        assert!(decode_data_uri("not base64 at all!").is_err());
    }

    #[test]
    fn normalize_infers_type_from_file_name() {
        let (uri, size) = normalize_upload("aGVsbG8=", Some("report.PDF")).unwrap();
        assert_eq!(uri, "data:application/pdf;base64,aGVsbG8=");
        assert_eq!(size, 5);
        assert!(normalize_upload("", Some("a.txt")).is_err());
    }

    #[test]
    fn sanitizes_header_unsafe_names() {
        assert_eq!(sanitize_filename("my\"file\r\n.pdf"), "my_file__.pdf");
        assert_eq!(sanitize_filename("  "), DEFAULT_FILE_NAME);
    }
}

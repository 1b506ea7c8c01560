//! `data:<mime>;base64,<payload>` helpers.

use base64::Engine as _;
use thiserror::Error;

/// A decoded base64 data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type including parameters (e.g. `audio/L16;codec=pcm;rate=24000`).
    pub mime_type: String,
    /// Decoded payload.
    pub data: Vec<u8>,
}

impl DataUri {
    /// Media type without parameters, lowercased.
    pub fn essence(&self) -> String {
        mime_essence(&self.mime_type)
    }

    /// Looks up a `name=value` parameter of the media type.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        mime_parameter(&self.mime_type, name)
    }
}

/// Errors from [`parse_data_uri`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUriError {
    /// The string does not start with `data:`.
    #[error("not a data URI")]
    MissingScheme,
    /// No comma separates the header from the payload.
    #[error("data URI has no payload separator")]
    MissingComma,
    /// The header does not declare `;base64`.
    #[error("data URI payload is not base64-encoded")]
    NotBase64,
    /// The payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Formats bytes as a base64 data URI.
pub fn format_data_uri(mime_type: &str, data: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(data)
    )
}

/// Parses a base64 data URI.
pub fn parse_data_uri(uri: &str) -> Result<DataUri, DataUriError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or(DataUriError::MissingScheme)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUriError::MissingComma)?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or(DataUriError::NotBase64)?;

    let data = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| DataUriError::InvalidBase64(e.to_string()))?;

    Ok(DataUri {
        mime_type: mime_type.to_string(),
        data,
    })
}

/// Returns everything after the first comma, or the whole string when
/// there is no comma.
pub fn data_uri_payload(uri: &str) -> &str {
    uri.split_once(',').map_or(uri, |(_, payload)| payload)
}

/// Media type without parameters, lowercased.
pub fn mime_essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Looks up a `name=value` media type parameter (case-insensitive name).
pub fn mime_parameter<'a>(mime_type: &'a str, name: &str) -> Option<&'a str> {
    mime_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim().trim_matches('"'))
    })
}

/// File extension for common media types, used when exporting.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_essence(mime_type).as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_then_parse() {
        let uri = format_data_uri("image/png", &[0x89, b'P', b'N', b'G']);
        assert_eq!(uri, "data:image/png;base64,iVBORw==");

        let parsed = parse_data_uri(&uri).unwrap();
        assert_eq!(parsed.mime_type, "image/png");
        assert_eq!(parsed.data, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_parse_rejects_non_data_uris() {
        assert_eq!(
            parse_data_uri("https://picsum.photos/1024"),
            Err(DataUriError::MissingScheme)
        );
        assert_eq!(
            parse_data_uri("data:image/png;base64"),
            Err(DataUriError::MissingComma)
        );
        assert_eq!(
            parse_data_uri("data:text/plain,hello"),
            Err(DataUriError::NotBase64)
        );
        assert!(matches!(
            parse_data_uri("data:image/png;base64,@@@"),
            Err(DataUriError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_payload_after_first_comma() {
        assert_eq!(data_uri_payload("data:audio/L16;base64,AAEC"), "AAEC");
        assert_eq!(data_uri_payload("a,b,c"), "b,c");
        assert_eq!(data_uri_payload("AAEC"), "AAEC");
    }

    #[test]
    fn test_mime_parameters() {
        let mime = "audio/L16;codec=pcm;rate=24000";
        assert_eq!(mime_essence(mime), "audio/l16");
        assert_eq!(mime_parameter(mime, "rate"), Some("24000"));
        assert_eq!(mime_parameter(mime, "RATE"), Some("24000"));
        assert_eq!(mime_parameter(mime, "channels"), None);
        assert_eq!(mime_parameter("audio/wav", "rate"), None);
    }

    #[test]
    fn test_parsed_uri_keeps_parameters() {
        let parsed = parse_data_uri("data:audio/L16;codec=pcm;rate=16000;base64,AAA=").unwrap();
        assert_eq!(parsed.essence(), "audio/l16");
        assert_eq!(parsed.parameter("rate"), Some("16000"));
        assert_eq!(parsed.data, vec![0, 0]);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("IMAGE/JPEG"), "jpg");
        assert_eq!(extension_for_mime("audio/wav"), "wav");
        assert_eq!(extension_for_mime("application/octet-stream"), "bin");
    }
}

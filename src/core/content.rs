use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Media types a node can declare for its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    Html,
    Plain,
    Json,
    OctetStream,
}

impl MediaType {
    /// The canonical MIME string for this media type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Html => "text/html",
            MediaType::Plain => "text/plain",
            MediaType::Json => "application/json",
            MediaType::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload a node generates.
///
/// Immutable once produced. Every variant is convertible to raw bytes
/// (what the assembler splices into the output stream) and to a
/// structured [`Value`] (what compound nodes aggregate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Content {
    Html(String),
    Text(String),
    Json(Value),
    Bytes { media: MediaType, data: Vec<u8> },
}

impl Content {
    /// The declared media type of this payload.
    pub fn media_type(&self) -> MediaType {
        match self {
            Content::Html(_) => MediaType::Html,
            Content::Text(_) => MediaType::Plain,
            Content::Json(_) => MediaType::Json,
            Content::Bytes { media, .. } => *media,
        }
    }

    /// Byte serialization of the payload.
    ///
    /// Textual variants serialize as UTF-8, JSON as its compact encoding,
    /// raw bytes as themselves.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Content::Html(s) | Content::Text(s) => s.clone().into_bytes(),
            Content::Json(v) => v.to_string().into_bytes(),
            Content::Bytes { data, .. } => data.clone(),
        }
    }

    /// Structured interchange form of the payload.
    ///
    /// Raw bytes are rendered lossily as text, since [`Value`] has no
    /// native byte-string variant.
    pub fn to_value(&self) -> Value {
        match self {
            Content::Html(s) | Content::Text(s) => Value::String(s.clone()),
            Content::Json(v) => v.clone(),
            Content::Bytes { data, .. } => {
                Value::String(String::from_utf8_lossy(data).into_owned())
            }
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<Value> for Content {
    fn from(v: Value) -> Self {
        Content::Json(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_type_strings() {
        assert_eq!(MediaType::Html.as_str(), "text/html");
        assert_eq!(MediaType::Plain.as_str(), "text/plain");
        assert_eq!(MediaType::Json.as_str(), "application/json");
        assert_eq!(MediaType::OctetStream.as_str(), "application/octet-stream");
    }

    #[test]
    fn test_content_to_bytes() {
        assert_eq!(Content::Html("<p>hi</p>".into()).to_bytes(), b"<p>hi</p>");
        assert_eq!(Content::Text("plain".into()).to_bytes(), b"plain");
        assert_eq!(Content::Json(json!({"a": 1})).to_bytes(), br#"{"a":1}"#);
        let raw = Content::Bytes {
            media: MediaType::OctetStream,
            data: vec![0, 159, 146],
        };
        assert_eq!(raw.to_bytes(), vec![0, 159, 146]);
    }

    #[test]
    fn test_content_to_value() {
        assert_eq!(Content::Text("x".into()).to_value(), json!("x"));
        assert_eq!(Content::Json(json!([1, 2])).to_value(), json!([1, 2]));
        let raw = Content::Bytes {
            media: MediaType::OctetStream,
            data: b"ok".to_vec(),
        };
        assert_eq!(raw.to_value(), json!("ok"));
    }

    #[test]
    fn test_content_media_type() {
        assert_eq!(Content::Html("".into()).media_type(), MediaType::Html);
        let raw = Content::Bytes {
            media: MediaType::Json,
            data: vec![],
        };
        assert_eq!(raw.media_type(), MediaType::Json);
    }

    #[test]
    fn test_content_from_conversions() {
        assert_eq!(Content::from("a"), Content::Text("a".into()));
        assert_eq!(Content::from(json!(1)), Content::Json(json!(1)));
    }
}

use reqwest::multipart::{Form, Part};

pub const MEDIA_TYPE_JSON: &str = "application/json";
pub const MEDIA_TYPE_FORM: &str = "multipart/form-data";
pub const MEDIA_TYPE_OCTET: &str = "application/octet-stream";

/// One binary attachment part of a multipart body. The part name is
/// `file{N}` with N assigned in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub name: String,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// The finalized body of an outgoing request. Which variant is produced
/// decides the content type of the request.
#[derive(Debug, Clone, PartialEq)]
pub enum WireBody {
    Json(serde_json::Value),
    Multipart {
        files: Vec<FilePart>,
        payload_json: String,
    },
}

impl WireBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            WireBody::Json(_) => MEDIA_TYPE_JSON,
            WireBody::Multipart { .. } => MEDIA_TYPE_FORM,
        }
    }

    /// Attaches this body to a reqwest request. The `payload_json` part is
    /// appended after the file parts.
    pub fn apply_to(self, request: reqwest::RequestBuilder) -> anyhow::Result<reqwest::RequestBuilder> {
        match self {
            WireBody::Json(json) => Ok(request.json(&json)),
            WireBody::Multipart {
                files,
                payload_json,
            } => {
                let mut form = Form::new();
                for file in files {
                    let part = Part::bytes(file.data)
                        .file_name(file.file_name)
                        .mime_str(MEDIA_TYPE_OCTET)?;
                    form = form.part(file.name, part);
                }
                form = form.text("payload_json", payload_json);
                Ok(request.multipart(form))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_the_variant() {
        let json = WireBody::Json(serde_json::json!({}));
        assert_eq!(json.content_type(), MEDIA_TYPE_JSON);

        let multipart = WireBody::Multipart {
            files: vec![],
            payload_json: "{}".to_string(),
        };
        assert_eq!(multipart.content_type(), MEDIA_TYPE_FORM);
    }
}

use crate::{ApiError, Category, Resource, Role, User, UserId};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for a JSON endpoint.
pub trait ApiRequest: Serialize {
    /// The decoded body of a successful (2xx) response.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Response Shapes
// =========================================================

/// Body of a failed response. Only `error` is ever shown to the user.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// A list endpoint payload.
///
/// Any JSON value that is not an array decodes to an empty list, but an array
/// whose elements do not match `T` is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPayload<T>(pub Vec<T>);

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ListPayload<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Array(items) => {
                serde_json::from_value(serde_json::Value::Array(items))
                    .map(ListPayload)
                    .map_err(D::Error::custom)
            }
            _ => Ok(ListPayload(Vec::new())),
        }
    }
}

/// `POST /api/login` reply: `{success, user}` or `{success: false, error}`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LoginResponse {
    /// Interpret a 2xx login reply. A `success: true` reply without a user is malformed.
    pub fn into_user(self, status: u16) -> Result<User, ApiError> {
        match (self.success, self.user) {
            (true, Some(user)) => Ok(user),
            (true, None) => Err(ApiError::Decode(
                "login succeeded without a user object".to_string(),
            )),
            (false, _) => Err(ApiError::rejected(status, self.error)),
        }
    }
}

/// Acknowledgement bodies (register, upload) are accepted as any JSON value.
pub type Ack = serde_json::Value;

// =========================================================
// Request Definitions
// =========================================================

/// List all categories
#[derive(Debug, Serialize)]
pub struct ListCategoriesRequest;

impl ApiRequest for ListCategoriesRequest {
    type Response = ListPayload<Category>;
    const PATH: &'static str = "/api/categories";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// List every user's resources; the client filters them.
#[derive(Debug, Serialize)]
pub struct ListResourcesRequest;

impl ApiRequest for ListResourcesRequest {
    type Response = ListPayload<Resource>;
    const PATH: &'static str = "/api/resources";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/api/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl ApiRequest for RegisterRequest {
    type Response = Ack;
    const PATH: &'static str = "/api/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// Multipart Upload
// =========================================================

/// A file picked by the user, read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartPart {
    Text { name: &'static str, value: String },
    File { name: &'static str, file: UploadFile },
}

/// `POST /api/upload` multipart form: `file`, `user_id`, `category_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub file: UploadFile,
    pub user_id: UserId,
    /// Category identifier as selected in the form (sent verbatim).
    pub category_id: String,
}

impl UploadForm {
    pub const PATH: &'static str = "/api/upload";
    pub const METHOD: HttpMethod = HttpMethod::Post;

    pub fn into_parts(self) -> Vec<MultipartPart> {
        vec![
            MultipartPart::File {
                name: "file",
                file: self.file,
            },
            MultipartPart::Text {
                name: "user_id",
                value: self.user_id.to_string(),
            },
            MultipartPart::Text {
                name: "category_id",
                value: self.category_id,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_payload_non_array_is_empty() {
        let payload: ListPayload<Category> =
            serde_json::from_value(json!({ "error": "db down" })).unwrap();
        assert!(payload.into_vec().is_empty());
    }

    #[test]
    fn test_list_payload_rejects_malformed_items() {
        let res = serde_json::from_value::<ListPayload<Category>>(json!([{ "id": "x" }]));
        assert!(res.is_err());
    }

    #[test]
    fn test_list_payload_decodes_items() {
        let payload: ListPayload<Category> = serde_json::from_value(json!([
            { "id": 1, "name": "Matemáticas" },
            { "id": 2, "name": "Física" }
        ]))
        .unwrap();
        let list = payload.into_vec();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "Física");
    }

    #[test]
    fn test_login_response_into_user() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "success": true,
            "user": { "id": 1, "username": "a" }
        }))
        .unwrap();
        assert_eq!(resp.into_user(200).unwrap().id, 1);

        let resp: LoginResponse = serde_json::from_value(json!({
            "success": false,
            "error": "Contraseña incorrecta"
        }))
        .unwrap();
        assert_eq!(
            resp.into_user(200).unwrap_err(),
            ApiError::rejected(200, Some("Contraseña incorrecta".into()))
        );

        let resp: LoginResponse = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(resp.into_user(200).unwrap_err().is_transport());
    }

    #[test]
    fn test_register_request_wire_shape() {
        let req = RegisterRequest {
            username: "ana".into(),
            email: "ana@uni.edu".into(),
            password: "secreto".into(),
            role: Role::Client,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "username": "ana",
                "email": "ana@uni.edu",
                "password": "secreto",
                "role": "client"
            })
        );
    }

    #[test]
    fn test_upload_form_parts() {
        let form = UploadForm {
            file: UploadFile::new("apuntes.pdf", "application/pdf", vec![1, 2, 3]),
            user_id: 7,
            category_id: "3".into(),
        };

        let parts = form.into_parts();
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[0], MultipartPart::File { name: "file", file } if file.size() == 3));
        assert_eq!(
            parts[1],
            MultipartPart::Text {
                name: "user_id",
                value: "7".into()
            }
        );
        assert_eq!(
            parts[2],
            MultipartPart::Text {
                name: "category_id",
                value: "3".into()
            }
        );
    }
}

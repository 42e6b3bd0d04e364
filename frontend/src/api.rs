//! 门户后端 API 客户端
//!
//! 所有请求都经由 `HttpClient` 发出，JSON 端点由 `ApiRequest` 描述路径、方法与响应类型。
//! 失败分为两类：传输失败（`Transport` / `Decode`）与业务拒绝（`Rejected`）。

use crate::web::http::{HttpClient, HttpRequest, HttpResponse};
use log::{debug, warn};
use portal_shared::protocol::{
    Ack, ApiRequest, ErrorBody, HttpMethod, ListCategoriesRequest, ListResourcesRequest, LoginRequest,
    RegisterRequest, UploadForm,
};
use portal_shared::{ApiError, ApiResult, Category, Resource, User};

#[derive(Clone, Debug, PartialEq)]
pub struct PortalApi<C> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> PortalApi<C> {
    pub fn new(base_url: &str, client: C) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        debug!("{} {}", req.method.as_str(), req.url);
        let res = self.client.send(req).await.map_err(|e| {
            warn!("request failed: {}", e);
            ApiError::from(e)
        })?;
        debug!("-> {}", res.status);
        Ok(res)
    }

    /// 发送 JSON 端点请求，返回 2xx 响应的状态码与解码后的内容
    async fn call<R: ApiRequest>(&self, request: &R) -> ApiResult<(u16, R::Response)> {
        let mut req = HttpRequest::new(&self.url(R::PATH), R::METHOD);
        if R::METHOD != HttpMethod::Get {
            let body =
                serde_json::to_string(request).map_err(|e| ApiError::Decode(e.to_string()))?;
            req = req.with_json(body);
        }

        let res = self.send(req).await?;
        if !res.ok() {
            return Err(rejection(&res));
        }
        let data = decode::<R::Response>(&res.body)?;
        Ok((res.status, data))
    }

    /// 获取全部分类
    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        let (_, list) = self.call(&ListCategoriesRequest).await?;
        Ok(list.into_vec())
    }

    /// 获取全部资源（所有用户的，过滤在客户端进行）
    pub async fn resources(&self) -> ApiResult<Vec<Resource>> {
        let (_, list) = self.call(&ListResourcesRequest).await?;
        Ok(list.into_vec())
    }

    /// 登录
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        let (status, reply) = self.call(request).await?;
        reply.into_user(status)
    }

    /// 注册；成功响应的内容不使用
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        self.call(request).await?;
        Ok(())
    }

    /// 上传文件（multipart/form-data）
    pub async fn upload(&self, form: UploadForm) -> ApiResult<()> {
        debug!(
            "uploading {} ({} bytes) to category {}",
            form.file.name,
            form.file.size(),
            form.category_id
        );
        let req = HttpRequest::new(&self.url(UploadForm::PATH), UploadForm::METHOD)
            .with_multipart(form.into_parts());

        let res = self.send(req).await?;
        if !res.ok() {
            return Err(rejection(&res));
        }
        decode::<Ack>(&res.body)?;
        Ok(())
    }

    /// 资源文件的可访问地址
    pub fn file_url(&self, path: &str) -> String {
        resolve_file_url(&self.base_url, path)
    }
}

/// 将资源的 `file_url` 拼接到 API 基础地址上；已是绝对地址的原样返回
pub fn resolve_file_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base_url = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| {
        warn!("undecodable response body: {}", e);
        ApiError::Decode(e.to_string())
    })
}

/// 非 2xx 响应；响应体中的 `error` 字段作为用户可见消息
///
/// 响应体不是 JSON 时视为传输失败
fn rejection(res: &HttpResponse) -> ApiError {
    let body = match decode::<serde_json::Value>(&res.body) {
        Ok(body) => body,
        Err(e) => return e,
    };
    let body = serde_json::from_value::<ErrorBody>(body).unwrap_or_default();
    ApiError::rejected(res.status, body.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::{HttpBody, MockHttpClient};
    use portal_shared::Role;
    use portal_shared::protocol::{MultipartPart, UploadFile};
    use serde_json::json;

    const BASE: &str = "http://api.test";

    fn api() -> PortalApi<MockHttpClient> {
        PortalApi::new("http://api.test/", MockHttpClient::new())
    }

    fn login_request() -> LoginRequest {
        LoginRequest {
            email: "a@b.com".into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn test_url_building() {
        let api = api();
        assert_eq!(api.base_url(), BASE);
        assert_eq!(api.url("/api/login"), "http://api.test/api/login");
        assert_eq!(api.url("api/login"), "http://api.test/api/login");
    }

    #[test]
    fn test_resolve_file_url() {
        assert_eq!(
            resolve_file_url(BASE, "/uploads/a.png"),
            "http://api.test/uploads/a.png"
        );
        assert_eq!(
            resolve_file_url("http://api.test/", "uploads/a.png"),
            "http://api.test/uploads/a.png"
        );
        assert_eq!(
            resolve_file_url(BASE, "https://cdn.test/a.png"),
            "https://cdn.test/a.png"
        );
    }

    #[tokio::test]
    async fn test_login_success() {
        let api = api();
        let url = format!("{}/api/login", BASE);
        api.client().mock_response(
            &url,
            200,
            json!({"success": true, "user": {"id": 1, "username": "a", "email": "a@b.com", "role": "client"}}),
        );

        let user = api.login(&login_request()).await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "a");

        let requests = api.client().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        let Some(HttpBody::Json(body)) = &requests[0].body else {
            panic!("login must send a JSON body");
        };
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent, json!({"email": "a@b.com", "password": "secret"}));
    }

    #[tokio::test]
    async fn test_login_rejected_with_message() {
        let api = api();
        let url = format!("{}/api/login", BASE);
        api.client().mock_response(
            &url,
            401,
            json!({"success": false, "error": "Contraseña incorrecta"}),
        );

        let err = api.login(&login_request()).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::rejected(401, Some("Contraseña incorrecta".into()))
        );
    }

    #[tokio::test]
    async fn test_login_success_false_on_2xx_is_rejected() {
        let api = api();
        let url = format!("{}/api/login", BASE);
        api.client()
            .mock_response(&url, 200, json!({"success": false, "error": "No"}));

        let err = api.login(&login_request()).await.unwrap_err();
        assert_eq!(err.server_message(), Some("No"));
    }

    #[tokio::test]
    async fn test_login_malformed_payload_is_transport_failure() {
        let api = api();
        let url = format!("{}/api/login", BASE);

        api.client().mock_raw(&url, 200, "<html>oops</html>");
        let err = api.login(&login_request()).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_login_success_without_user_is_transport_failure() {
        let api = api();
        let url = format!("{}/api/login", BASE);
        api.client().mock_response(&url, 200, json!({"success": true}));

        let err = api.login(&login_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_network_error() {
        let api = api();
        let url = format!("{}/api/login", BASE);
        api.client().mock_network_error(&url);

        let err = api.login(&login_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn test_register_accepts_any_ack() {
        let api = api();
        let url = format!("{}/api/register", BASE);
        api.client().mock_response(&url, 201, json!({"id": 7}));

        let request = RegisterRequest {
            username: "ana".into(),
            email: "ana@uni.edu".into(),
            password: "secreto".into(),
            role: Role::Admin,
        };
        api.register(&request).await.unwrap();

        let requests = api.client().requests.borrow();
        let Some(HttpBody::Json(body)) = &requests[0].body else {
            panic!("register must send a JSON body");
        };
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent["role"], "admin");
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "ana".into(),
            email: "ana@uni.edu".into(),
            password: "secreto".into(),
            role: Role::Client,
        }
    }

    #[tokio::test]
    async fn test_register_html_error_page_is_transport_failure() {
        let api = api();
        let url = format!("{}/api/register", BASE);
        api.client()
            .mock_raw(&url, 500, "<html><body>Internal Server Error</body></html>");

        let err = api.register(&register_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_register_rejected_json_without_error_field() {
        let api = api();
        let url = format!("{}/api/register", BASE);
        api.client().mock_response(&url, 409, json!({"success": false}));

        let err = api.register(&register_request()).await.unwrap_err();
        assert_eq!(err, ApiError::rejected(409, None));
    }

    #[tokio::test]
    async fn test_list_endpoints() {
        let api = api();
        api.client().mock_response(
            &format!("{}/api/categories", BASE),
            200,
            json!([{"id": 1, "name": "Física"}, {"id": 2, "name": "Química"}]),
        );
        api.client().mock_response(
            &format!("{}/api/resources", BASE),
            200,
            json!([{"id": 5, "title": "Apuntes", "user_id": 1, "category_id": 2, "file_url": "/uploads/a.pdf"}]),
        );

        let categories = api.categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].name, "Química");

        let resources = api.resources().await.unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].category_id, 2);

        let requests = api.client().requests.borrow();
        assert!(requests.iter().all(|r| r.method == HttpMethod::Get));
        assert!(requests.iter().all(|r| r.body.is_none()));
    }

    #[tokio::test]
    async fn test_list_non_array_is_empty() {
        let api = api();
        api.client().mock_response(
            &format!("{}/api/categories", BASE),
            200,
            json!({"error": "db down"}),
        );
        assert!(api.categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_non_2xx_without_json_is_transport_failure() {
        let api = api();
        api.client()
            .mock_raw(&format!("{}/api/resources", BASE), 503, "");
        let err = api.resources().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_list_non_2xx_with_error_body_is_rejected() {
        let api = api();
        api.client().mock_response(
            &format!("{}/api/categories", BASE),
            500,
            json!({"error": "db down"}),
        );
        let err = api.categories().await.unwrap_err();
        assert_eq!(err, ApiError::rejected(500, Some("db down".into())));
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_parts() {
        let api = api();
        let url = format!("{}/api/upload", BASE);
        api.client().mock_response(&url, 200, json!({"ok": true}));

        let file = UploadFile::new("tarea.pdf", "application/pdf", vec![1, 2, 3]);
        let form = UploadForm {
            file: file.clone(),
            user_id: 4,
            category_id: "2".into(),
        };
        api.upload(form).await.unwrap();

        let requests = api.client().requests.borrow();
        assert_eq!(requests[0].url, url);
        assert!(!requests[0].headers.contains_key("Content-Type"));
        let Some(HttpBody::Multipart(parts)) = &requests[0].body else {
            panic!("upload must send a multipart body");
        };
        assert_eq!(
            parts,
            &vec![
                MultipartPart::File { name: "file", file },
                MultipartPart::Text {
                    name: "user_id",
                    value: "4".into()
                },
                MultipartPart::Text {
                    name: "category_id",
                    value: "2".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_upload_rejected() {
        let api = api();
        let url = format!("{}/api/upload", BASE);
        api.client()
            .mock_response(&url, 413, json!({"error": "Archivo demasiado grande"}));

        let form = UploadForm {
            file: UploadFile::new("a.mp4", "video/mp4", vec![0]),
            user_id: 1,
            category_id: "1".into(),
        };
        let err = api.upload(form).await.unwrap_err();
        assert_eq!(err.server_message(), Some("Archivo demasiado grande"));
    }

    #[tokio::test]
    async fn test_upload_non_json_success_is_transport_failure() {
        let api = api();
        let url = format!("{}/api/upload", BASE);
        api.client().mock_raw(&url, 200, "<html>ok</html>");

        let form = UploadForm {
            file: UploadFile::new("a.pdf", "application/pdf", vec![0]),
            user_id: 1,
            category_id: "1".into(),
        };
        let err = api.upload(form).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}

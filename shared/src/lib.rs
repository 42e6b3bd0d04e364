use serde::{Deserialize, Deserializer, Serialize};

pub mod date;
pub mod error;
pub mod protocol;

pub use error::{ApiError, ApiResult};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 会话在浏览器 LocalStorage 中的键名
pub const STORAGE_SESSION_KEY: &str = "academicUser";

pub type UserId = i64;
pub type CategoryId = i64;
pub type ResourceId = i64;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户角色
///
/// 未知的角色字符串保存在 `Other` 中，避免因服务端新增角色而导致会话解码失败。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Client,
    Admin,
    #[serde(untagged)]
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Client => "client",
            Role::Admin => "admin",
            Role::Other(value) => value,
        }
    }

    /// 从表单 `<select>` 的取值解析角色
    pub fn from_value(value: &str) -> Self {
        match value {
            "client" => Role::Client,
            "admin" => Role::Admin,
            other => Role::Other(other.to_string()),
        }
    }
}

/// 已认证用户（即会话）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// 资源预览类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Video,
    None,
}

/// 用户上传的文件记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub file_url: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource {
    pub fn preview_kind(&self) -> PreviewKind {
        match self.content_type.as_deref() {
            Some(ct) if ct.starts_with("image/") => PreviewKind::Image,
            Some(ct) if ct.starts_with("video/") => PreviewKind::Video,
            _ => PreviewKind::None,
        }
    }

    /// 用于列表展示的创建日期
    pub fn display_date(&self) -> String {
        self.created_at
            .as_deref()
            .map(date::display_date)
            .unwrap_or_default()
    }
}

/// 服务端返回 `null` 时按默认值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_tolerates_missing_and_null_fields() {
        let user: User = serde_json::from_value(json!({ "id": 1, "username": "a" })).unwrap();
        assert_eq!(user.email, "");
        assert_eq!(user.role, Role::Client);

        let user: User = serde_json::from_value(json!({
            "id": 2, "username": "b", "email": null, "role": null
        }))
        .unwrap();
        assert_eq!(user.id, 2);
        assert_eq!(user.role, Role::Client);
    }

    #[test]
    fn test_user_requires_id() {
        let res = serde_json::from_value::<User>(json!({ "username": "a" }));
        assert!(res.is_err());
    }

    #[test]
    fn test_role_unknown_value_is_kept() {
        let role: Role = serde_json::from_value(json!("moderator")).unwrap();
        assert_eq!(role, Role::Other("moderator".to_string()));
        assert_eq!(serde_json::to_value(&role).unwrap(), json!("moderator"));
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), json!("admin"));
        assert_eq!(Role::from_value("client"), Role::Client);
    }

    #[test]
    fn test_resource_preview_kind() {
        let mut resource: Resource = serde_json::from_value(json!({
            "id": 1,
            "title": "foto",
            "user_id": 1,
            "category_id": 2,
            "file_url": "/uploads/foto.png",
            "content_type": "image/png",
            "created_at": "2024-03-05 10:00:00"
        }))
        .unwrap();
        assert_eq!(resource.preview_kind(), PreviewKind::Image);
        assert_eq!(resource.display_date(), "5/3/2024");

        resource.content_type = Some("video/mp4".into());
        assert_eq!(resource.preview_kind(), PreviewKind::Video);

        resource.content_type = None;
        assert_eq!(resource.preview_kind(), PreviewKind::None);
    }

    #[test]
    fn test_resource_null_content_type() {
        let resource: Resource = serde_json::from_value(json!({
            "id": 1,
            "title": "doc",
            "user_id": 1,
            "category_id": 2,
            "file_url": "/uploads/doc.pdf",
            "content_type": null
        }))
        .unwrap();
        assert_eq!(resource.content_type, None);
        assert_eq!(resource.display_date(), "");
    }
}

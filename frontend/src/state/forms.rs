//! 表单状态与本地校验
//!
//! 每个表单只负责：
//! - 数据的持有
//! - 数据的重置
//! - 校验并转换为请求对象（失败时返回要展示的提示）

use crate::messages;
use portal_shared::protocol::{LoginRequest, RegisterRequest, UploadFile, UploadForm};
use portal_shared::{Role, UserId};

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn set(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }

    pub fn validate(&self) -> Result<LoginRequest, &'static str> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(messages::LOGIN_MISSING_FIELDS);
        }
        Ok(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl RegisterForm {
    pub fn set(&mut self, field: RegisterField, value: String) {
        match field {
            RegisterField::Username => self.username = value,
            RegisterField::Email => self.email = value,
            RegisterField::Password => self.password = value,
            RegisterField::ConfirmPassword => self.confirm_password = value,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 按顺序校验：必填 -> 密码长度 -> 两次密码一致，第一个失败的规则决定提示
    pub fn validate(&self) -> Result<RegisterRequest, &'static str> {
        let fields = [
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(messages::REGISTER_MISSING_FIELDS);
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(messages::REGISTER_PASSWORD_TOO_SHORT);
        }
        if self.password != self.confirm_password {
            return Err(messages::REGISTER_PASSWORD_MISMATCH);
        }
        Ok(RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role.clone(),
        })
    }
}

/// 待上传的文件与分类选择
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadDraft {
    pub file: Option<UploadFile>,
    /// 所选分类的 id（空字符串表示未选择）
    pub category_id: String,
}

impl UploadDraft {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self, user_id: UserId) -> Result<UploadForm, &'static str> {
        match &self.file {
            Some(file) if !self.category_id.is_empty() => Ok(UploadForm {
                file: file.clone(),
                user_id,
                category_id: self.category_id.clone(),
            }),
            _ => Err(messages::UPLOAD_MISSING_INPUT),
        }
    }
}

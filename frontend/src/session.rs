//! 会话管理模块
//!
//! 负责会话的恢复、持久化与清除。会话没有过期策略，
//! 恢复时也不向服务端重新校验，直到用户主动注销。

use log::{debug, info, warn};
use portal_shared::User;
use std::cell::RefCell;
use std::collections::HashMap;

/// 键值存储抽象（浏览器 LocalStorage 或内存实现）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 内存键值存储，用于无浏览器环境与测试
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

/// 会话管理器
///
/// 会话以 JSON 形式保存在固定键下。
#[derive(Debug, Clone)]
pub struct SessionManager<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 启动时恢复会话
    ///
    /// 存储内容无法解码时视为没有会话，并删除该值。
    pub fn restore(&self) -> Option<User> {
        let raw = self.store.get(&self.key)?;
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                info!("restored session for user {}", user.id);
                Some(user)
            }
            Err(e) => {
                warn!("discarding unreadable session under {}: {}", self.key, e);
                self.store.delete(&self.key);
                None
            }
        }
    }

    pub fn persist(&self, user: &User) {
        let raw = match serde_json::to_string(user) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("failed to encode session: {}", e);
                return;
            }
        };
        if self.store.set(&self.key, &raw) {
            debug!("persisted session for user {}", user.id);
        } else {
            warn!("failed to persist session under {}", self.key);
        }
    }

    pub fn clear(&self) {
        if !self.store.delete(&self.key) {
            warn!("failed to clear session under {}", self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_shared::{Role, STORAGE_SESSION_KEY};

    fn user() -> User {
        User {
            id: 4,
            username: "lucia".into(),
            email: "lucia@uni.edu".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_restore_empty() {
        let sessions = SessionManager::new(MemoryStore::new(), STORAGE_SESSION_KEY);
        assert_eq!(sessions.restore(), None);
    }

    #[test]
    fn test_persist_then_restore() {
        let sessions = SessionManager::new(MemoryStore::new(), STORAGE_SESSION_KEY);
        sessions.persist(&user());

        assert!(sessions.store().get(STORAGE_SESSION_KEY).is_some());
        assert_eq!(sessions.restore(), Some(user()));
    }

    #[test]
    fn test_clear_removes_session() {
        let sessions = SessionManager::new(MemoryStore::new(), STORAGE_SESSION_KEY);
        sessions.persist(&user());
        sessions.clear();

        assert_eq!(sessions.store().get(STORAGE_SESSION_KEY), None);
        assert_eq!(sessions.restore(), None);
    }

    #[test]
    fn test_corrupt_session_is_discarded() {
        let store = MemoryStore::new();
        store.set(STORAGE_SESSION_KEY, "{not json");
        let sessions = SessionManager::new(store, STORAGE_SESSION_KEY);

        assert_eq!(sessions.restore(), None);
        assert_eq!(sessions.store().get(STORAGE_SESSION_KEY), None);
    }

    #[test]
    fn test_restore_accepts_minimal_user() {
        let store = MemoryStore::new();
        store.set(STORAGE_SESSION_KEY, r#"{"id":1,"username":"a"}"#);
        let sessions = SessionManager::new(store, STORAGE_SESSION_KEY);

        let restored = sessions.restore().unwrap();
        assert_eq!(restored.id, 1);
        assert_eq!(restored.username, "a");
    }
}

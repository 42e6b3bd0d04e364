/// 提示类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// 短暂显示的提示条
///
/// `seq` 单调递增，过期定时器只会清除与自己序号相同的提示，
/// 因此新的提示不会被旧定时器提前关闭。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub seq: u64,
    pub kind: AlertKind,
    pub text: String,
}

impl Alert {
    pub fn is_success(&self) -> bool {
        self.kind == AlertKind::Success
    }
}

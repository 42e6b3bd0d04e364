//! 副作用执行层
//!
//! `AppState::apply` 只产出 `Command`，这里负责执行它们：
//! - 网络命令调用 `PortalApi`，结果转换为对应的完成事件送回状态机
//! - 会话命令同步读写存储
//! - 提示过期定时由驱动方自行安排（浏览器中为 `set_timeout`）
//!
//! 测试中使用不依赖浏览器的 `Controller` 驱动，按顺序执行命令直到没有后续事件。

use crate::api::PortalApi;
use crate::session::{KeyValueStore, SessionManager};
use crate::state::{Action, Command};
use crate::web::http::HttpClient;
use log::debug;
#[cfg(test)]
use crate::state::AppState;
#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::time::Duration;

/// 执行单个命令，返回需要送回状态机的完成事件
pub async fn execute<C, S>(
    api: &PortalApi<C>,
    sessions: &SessionManager<S>,
    command: Command,
) -> Option<Action>
where
    C: HttpClient,
    S: KeyValueStore,
{
    match command {
        Command::LoadCategories => Some(Action::CategoriesLoaded(api.categories().await)),
        Command::LoadResources => Some(Action::ResourcesLoaded(api.resources().await)),
        Command::Login(request) => Some(Action::LoginFinished(api.login(&request).await)),
        Command::Register(request) => Some(Action::RegisterFinished(api.register(&request).await)),
        Command::Upload(form) => Some(Action::UploadFinished(api.upload(form).await)),
        Command::PersistSession(user) => {
            sessions.persist(&user);
            None
        }
        Command::ClearSession => {
            sessions.clear();
            None
        }
        Command::ScheduleAlertExpiry { seq, .. } => {
            debug!("alert {} expiry is scheduled by the driver", seq);
            None
        }
    }
}

/// 已安排、尚未触发的提示过期
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub seq: u64,
    pub after: Duration,
}

/// 无浏览器的测试驱动：串行执行命令，定时器由调用方手动触发
#[cfg(test)]
pub struct Controller<C, S> {
    state: AppState,
    api: PortalApi<C>,
    sessions: SessionManager<S>,
    timers: Vec<PendingTimer>,
}

#[cfg(test)]
impl<C, S> Controller<C, S>
where
    C: HttpClient,
    S: KeyValueStore,
{
    pub fn new(state: AppState, api: PortalApi<C>, sessions: SessionManager<S>) -> Self {
        Self {
            state,
            api,
            sessions,
            timers: Vec::new(),
        }
    }

    /// 启动：恢复已保存的会话（如有）
    pub async fn start(&mut self) {
        if let Some(user) = self.sessions.restore() {
            self.dispatch(Action::SessionRestored(user)).await;
        }
    }

    /// 应用事件并执行其产生的全部命令，直到没有后续事件
    pub async fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            for command in self.state.apply(action) {
                if let Command::ScheduleAlertExpiry { seq, after } = command {
                    self.timers.push(PendingTimer { seq, after });
                    continue;
                }
                if let Some(next) = execute(&self.api, &self.sessions, command).await {
                    queue.push_back(next);
                }
            }
        }
    }

    /// 触发所有已安排的提示过期
    pub async fn fire_timers(&mut self) {
        let timers = std::mem::take(&mut self.timers);
        for timer in timers {
            self.dispatch(Action::AlertExpired(timer.seq)).await;
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api(&self) -> &PortalApi<C> {
        &self.api
    }

    pub fn sessions(&self) -> &SessionManager<S> {
        &self.sessions
    }

    pub fn pending_timers(&self) -> &[PendingTimer] {
        &self.timers
    }
}

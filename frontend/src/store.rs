//! 浏览器驱动：把状态机接入 Leptos 的响应式系统
//!
//! - 状态保存在 `RwSignal<AppState>` 中，组件按需读取
//! - `dispatch` 同步应用事件，再把产生的命令交给 `sync::execute` 异步执行
//! - 提示过期通过 `set_timeout` 安排

use crate::api::PortalApi;
use crate::config::AppConfig;
use crate::session::SessionManager;
use crate::state::{Action, AppState, Command, View};
use crate::sync;
use crate::web::LocalStorage;
use crate::web::http::FetchHttpClient;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

#[derive(Clone, Copy)]
pub struct PortalStore {
    state: RwSignal<AppState>,
    api: StoredValue<PortalApi<FetchHttpClient>>,
    sessions: StoredValue<SessionManager<LocalStorage>>,
}

impl PortalStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            state: RwSignal::new(AppState::new(config.alert_duration)),
            api: StoredValue::new(PortalApi::new(&config.api_base_url, FetchHttpClient)),
            sessions: StoredValue::new(SessionManager::new(
                LocalStorage,
                config.session_key.clone(),
            )),
        }
    }

    /// 启动时恢复会话；恢复成功直接进入面板，不访问登录端点
    pub fn init(&self) {
        let restored = self.sessions.with_value(|sessions| sessions.restore());
        if let Some(user) = restored {
            self.dispatch(Action::SessionRestored(user));
        }
    }

    pub fn state(&self) -> RwSignal<AppState> {
        self.state
    }

    pub fn view(&self) -> Signal<View> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.view()))
    }

    /// 资源文件的可访问地址
    pub fn file_url(&self, path: &str) -> String {
        self.api.with_value(|api| api.file_url(path))
    }

    /// 应用事件并执行产生的命令
    pub fn dispatch(&self, action: Action) {
        debug!("dispatch {:?}", ActionName(&action));
        let commands = self
            .state
            .try_update(|state| state.apply(action))
            .unwrap_or_default();

        for command in commands {
            self.run(command);
        }
    }

    /// 路由请求的视图切换
    pub fn request_view(&self, view: View) {
        match view {
            View::Login => self.dispatch(Action::ShowLogin),
            View::Register => self.dispatch(Action::ShowRegister),
            // 面板只能通过登录进入
            View::Dashboard => {}
        }
    }

    fn run(&self, command: Command) {
        if let Command::ScheduleAlertExpiry { seq, after } = command {
            let store = *self;
            set_timeout(move || store.dispatch(Action::AlertExpired(seq)), after);
            return;
        }

        let store = *self;
        spawn_local(async move {
            let api = store.api.get_value();
            let sessions = store.sessions.get_value();
            if let Some(next) = sync::execute(&api, &sessions, command).await {
                store.dispatch(next);
            }
        });
    }
}

/// 日志中只记录事件名，不输出表单内容（含密码）与文件字节
struct ActionName<'a>(&'a Action);

impl std::fmt::Debug for ActionName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            Action::SessionRestored(_) => "SessionRestored",
            Action::ShowLogin => "ShowLogin",
            Action::ShowRegister => "ShowRegister",
            Action::EditLogin(..) => "EditLogin",
            Action::SubmitLogin => "SubmitLogin",
            Action::LoginFinished(_) => "LoginFinished",
            Action::EditRegister(..) => "EditRegister",
            Action::SelectRole(_) => "SelectRole",
            Action::SubmitRegister => "SubmitRegister",
            Action::RegisterFinished(_) => "RegisterFinished",
            Action::Logout => "Logout",
            Action::CategoriesLoaded(_) => "CategoriesLoaded",
            Action::ResourcesLoaded(_) => "ResourcesLoaded",
            Action::SelectFilter(_) => "SelectFilter",
            Action::SelectUploadFile(_) => "SelectUploadFile",
            Action::SelectUploadCategory(_) => "SelectUploadCategory",
            Action::SubmitUpload => "SubmitUpload",
            Action::UploadFinished(_) => "UploadFinished",
            Action::AlertExpired(_) => "AlertExpired",
        };
        f.write_str(name)
    }
}

/// 从 Context 获取门户状态
pub fn use_store() -> PortalStore {
    use_context::<PortalStore>().expect("PortalStore not found in context. Ensure App provides it.")
}

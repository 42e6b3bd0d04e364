//! 应用状态机
//!
//! 整个界面由单一的 `AppState` 值描述，只能通过 `AppState::apply` 接收离散的
//! `Action` 进行迁移。副作用（网络请求、会话持久化、提示过期定时）不在这里执行，
//! 而是以 `Command` 的形式交给驱动层；驱动层完成后再把结果作为新的 `Action` 送回。
//!
//! 视图迁移：
//! - login <-> register：用户触发，无条件
//! - login -> dashboard：仅在认证成功（或启动时恢复会话）
//! - dashboard -> login：仅在注销
//!
//! 仪表盘数据（会话、分类、资源、过滤条件、待上传文件）只存在于 `Screen::Dashboard`
//! 内部，因此“有会话”与“处于 dashboard”始终等价，注销即清空全部仪表盘状态。

mod alert;
mod filter;
mod forms;

pub use alert::{Alert, AlertKind};
pub use filter::{ALL_CATEGORIES, CategoryFilter, visible_resources};
pub use forms::{LoginField, LoginForm, RegisterField, RegisterForm, UploadDraft};

use crate::messages;
use log::{debug, info, warn};
use portal_shared::protocol::{LoginRequest, RegisterRequest, UploadFile, UploadForm};
use portal_shared::{ApiError, Category, Resource, Role, User};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Dashboard,
}

/// 占用全局忙碌令牌的写操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    Upload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub session: User,
    pub categories: Vec<Category>,
    pub resources: Vec<Resource>,
    pub filter: CategoryFilter,
    pub upload: UploadDraft,
}

impl Dashboard {
    fn new(session: User) -> Self {
        Self {
            session,
            categories: Vec::new(),
            resources: Vec::new(),
            filter: CategoryFilter::All,
            upload: UploadDraft::default(),
        }
    }

    pub fn visible_resources(&self) -> Vec<&Resource> {
        visible_resources(&self.resources, &self.session, &self.filter)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login,
    Register,
    Dashboard(Dashboard),
}

/// 用户事件或网络完成事件
#[derive(Debug)]
pub enum Action {
    /// 启动时从存储中恢复的会话
    SessionRestored(User),
    ShowLogin,
    ShowRegister,

    EditLogin(LoginField, String),
    SubmitLogin,
    LoginFinished(Result<User, ApiError>),

    EditRegister(RegisterField, String),
    SelectRole(Role),
    SubmitRegister,
    RegisterFinished(Result<(), ApiError>),

    Logout,

    CategoriesLoaded(Result<Vec<Category>, ApiError>),
    ResourcesLoaded(Result<Vec<Resource>, ApiError>),
    SelectFilter(String),

    SelectUploadFile(Option<UploadFile>),
    SelectUploadCategory(String),
    SubmitUpload,
    UploadFinished(Result<(), ApiError>),

    AlertExpired(u64),
}

/// 交给驱动层执行的副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadCategories,
    LoadResources,
    Login(LoginRequest),
    Register(RegisterRequest),
    Upload(UploadForm),
    PersistSession(User),
    ClearSession,
    ScheduleAlertExpiry { seq: u64, after: Duration },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    screen: Screen,
    pub login: LoginForm,
    pub register: RegisterForm,
    busy: Option<Operation>,
    alert: Option<Alert>,
    alert_seq: u64,
    alert_duration: Duration,
}

impl AppState {
    pub fn new(alert_duration: Duration) -> Self {
        Self {
            screen: Screen::Login,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            busy: None,
            alert: None,
            alert_seq: 0,
            alert_duration,
        }
    }

    // --- Accessors ---

    pub fn view(&self) -> View {
        match self.screen {
            Screen::Login => View::Login,
            Screen::Register => View::Register,
            Screen::Dashboard(_) => View::Dashboard,
        }
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.screen {
            Screen::Dashboard(dashboard) => Some(dashboard),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&User> {
        self.dashboard().map(|d| &d.session)
    }

    pub fn busy(&self) -> Option<Operation> {
        self.busy
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    // --- Transitions ---

    /// 应用一个事件，返回需要执行的副作用
    pub fn apply(&mut self, action: Action) -> Vec<Command> {
        let mut commands = Vec::new();

        match action {
            Action::SessionRestored(user) => {
                if self.dashboard().is_some() {
                    warn!("session restore ignored: a session is already active");
                } else {
                    self.enter_dashboard(user, &mut commands);
                }
            }
            Action::ShowLogin => match self.screen {
                Screen::Register => self.screen = Screen::Login,
                Screen::Login => {}
                Screen::Dashboard(_) => debug!("login view is unreachable while signed in"),
            },
            Action::ShowRegister => match self.screen {
                Screen::Login => self.screen = Screen::Register,
                Screen::Register => {}
                Screen::Dashboard(_) => debug!("register view is unreachable while signed in"),
            },

            Action::EditLogin(field, value) => self.login.set(field, value),
            Action::SubmitLogin => self.submit_login(&mut commands),
            Action::LoginFinished(result) => self.finish_login(result, &mut commands),

            Action::EditRegister(field, value) => self.register.set(field, value),
            Action::SelectRole(role) => self.register.role = role,
            Action::SubmitRegister => self.submit_register(&mut commands),
            Action::RegisterFinished(result) => self.finish_register(result, &mut commands),

            Action::Logout => self.logout(&mut commands),

            Action::CategoriesLoaded(result) => self.categories_loaded(result, &mut commands),
            Action::ResourcesLoaded(result) => self.resources_loaded(result, &mut commands),
            Action::SelectFilter(value) => {
                if let Screen::Dashboard(dashboard) = &mut self.screen {
                    dashboard.filter = CategoryFilter::parse(&value);
                }
            }

            Action::SelectUploadFile(file) => {
                if let Screen::Dashboard(dashboard) = &mut self.screen {
                    dashboard.upload.file = file;
                }
            }
            Action::SelectUploadCategory(category_id) => {
                if let Screen::Dashboard(dashboard) = &mut self.screen {
                    dashboard.upload.category_id = category_id;
                }
            }
            Action::SubmitUpload => self.submit_upload(&mut commands),
            Action::UploadFinished(result) => self.finish_upload(result, &mut commands),

            Action::AlertExpired(seq) => {
                if self.alert.as_ref().is_some_and(|alert| alert.seq == seq) {
                    self.alert = None;
                }
            }
        }

        commands
    }

    fn enter_dashboard(&mut self, user: User, commands: &mut Vec<Command>) {
        info!("entering dashboard as {} ({})", user.username, user.id);
        self.screen = Screen::Dashboard(Dashboard::new(user));
        commands.push(Command::LoadCategories);
        commands.push(Command::LoadResources);
    }

    /// 忙碌令牌是否空闲；被占用时拒绝新的写操作
    fn idle_for(&self, op: Operation) -> bool {
        match self.busy {
            Some(current) => {
                debug!("{:?} rejected: {:?} still in flight", op, current);
                false
            }
            None => true,
        }
    }

    fn release(&mut self, op: Operation) {
        if self.busy == Some(op) {
            self.busy = None;
        } else {
            warn!("{:?} finished without holding the busy token", op);
        }
    }

    fn show_alert(&mut self, kind: AlertKind, text: impl Into<String>, commands: &mut Vec<Command>) {
        self.alert_seq += 1;
        let seq = self.alert_seq;
        self.alert = Some(Alert {
            seq,
            kind,
            text: text.into(),
        });
        commands.push(Command::ScheduleAlertExpiry {
            seq,
            after: self.alert_duration,
        });
    }

    // --- Login ---

    fn submit_login(&mut self, commands: &mut Vec<Command>) {
        if !matches!(self.screen, Screen::Login) {
            debug!("login submitted outside the login view");
            return;
        }
        if !self.idle_for(Operation::Login) {
            return;
        }
        match self.login.validate() {
            Err(msg) => self.show_alert(AlertKind::Error, msg, commands),
            Ok(request) => {
                self.busy = Some(Operation::Login);
                commands.push(Command::Login(request));
            }
        }
    }

    fn finish_login(&mut self, result: Result<User, ApiError>, commands: &mut Vec<Command>) {
        self.release(Operation::Login);
        match result {
            Ok(user) if self.dashboard().is_none() => {
                commands.push(Command::PersistSession(user.clone()));
                self.enter_dashboard(user, commands);
                self.show_alert(AlertKind::Success, messages::LOGIN_SUCCESS, commands);
            }
            Ok(_) => warn!("login completed while a session is already active"),
            Err(e) => {
                warn!("login failed: {}", e);
                let text = e.alert_text(messages::LOGIN_REJECTED, messages::CONNECTION_ERROR);
                self.show_alert(AlertKind::Error, text, commands);
            }
        }
    }

    // --- Register ---

    fn submit_register(&mut self, commands: &mut Vec<Command>) {
        if !matches!(self.screen, Screen::Register) {
            debug!("register submitted outside the register view");
            return;
        }
        if !self.idle_for(Operation::Register) {
            return;
        }
        match self.register.validate() {
            Err(msg) => self.show_alert(AlertKind::Error, msg, commands),
            Ok(request) => {
                self.busy = Some(Operation::Register);
                commands.push(Command::Register(request));
            }
        }
    }

    fn finish_register(&mut self, result: Result<(), ApiError>, commands: &mut Vec<Command>) {
        self.release(Operation::Register);
        match result {
            Ok(()) => {
                self.show_alert(AlertKind::Success, messages::REGISTER_SUCCESS, commands);
                if matches!(self.screen, Screen::Register) {
                    self.screen = Screen::Login;
                }
                self.register.reset();
            }
            Err(e) => {
                warn!("register failed: {}", e);
                let text = e.alert_text(messages::REGISTER_REJECTED, messages::CONNECTION_ERROR);
                self.show_alert(AlertKind::Error, text, commands);
            }
        }
    }

    // --- Logout ---

    fn logout(&mut self, commands: &mut Vec<Command>) {
        if self.dashboard().is_none() {
            debug!("logout ignored: no active session");
            return;
        }
        info!("signing out");
        self.screen = Screen::Login;
        commands.push(Command::ClearSession);
        self.show_alert(AlertKind::Success, messages::LOGOUT_SUCCESS, commands);
    }

    // --- Dashboard data ---

    fn categories_loaded(
        &mut self,
        result: Result<Vec<Category>, ApiError>,
        commands: &mut Vec<Command>,
    ) {
        let Screen::Dashboard(dashboard) = &mut self.screen else {
            debug!("categories arrived after sign-out, dropping");
            return;
        };
        match result {
            Ok(categories) => dashboard.categories = categories,
            Err(e) => {
                warn!("loading categories failed: {}", e);
                dashboard.categories.clear();
                self.show_alert(AlertKind::Error, messages::CATEGORIES_LOAD_FAILED, commands);
            }
        }
    }

    fn resources_loaded(
        &mut self,
        result: Result<Vec<Resource>, ApiError>,
        commands: &mut Vec<Command>,
    ) {
        // 上传成功后的重新加载完成，归还上传持有的令牌
        if self.busy == Some(Operation::Upload) {
            self.busy = None;
        }
        let Screen::Dashboard(dashboard) = &mut self.screen else {
            debug!("resources arrived after sign-out, dropping");
            return;
        };
        match result {
            Ok(resources) => dashboard.resources = resources,
            Err(e) => {
                warn!("loading resources failed: {}", e);
                dashboard.resources.clear();
                self.show_alert(AlertKind::Error, messages::RESOURCES_LOAD_FAILED, commands);
            }
        }
    }

    // --- Upload ---

    fn submit_upload(&mut self, commands: &mut Vec<Command>) {
        let Some(dashboard) = self.dashboard() else {
            debug!("upload submitted without a session");
            return;
        };
        if !self.idle_for(Operation::Upload) {
            return;
        }
        match dashboard.upload.validate(dashboard.session.id) {
            Err(msg) => self.show_alert(AlertKind::Error, msg, commands),
            Ok(form) => {
                self.busy = Some(Operation::Upload);
                commands.push(Command::Upload(form));
            }
        }
    }

    /// 成功时令牌保留到随后的 `ResourcesLoaded`
    fn finish_upload(&mut self, result: Result<(), ApiError>, commands: &mut Vec<Command>) {
        match result {
            Ok(()) => {
                self.show_alert(AlertKind::Success, messages::UPLOAD_SUCCESS, commands);
                if let Screen::Dashboard(dashboard) = &mut self.screen {
                    dashboard.upload.reset();
                    commands.push(Command::LoadResources);
                } else {
                    self.release(Operation::Upload);
                }
            }
            Err(e) => {
                self.release(Operation::Upload);
                warn!("upload failed: {}", e);
                let text = e.alert_text(messages::UPLOAD_REJECTED, messages::UPLOAD_CONNECTION_ERROR);
                self.show_alert(AlertKind::Error, text, commands);
            }
        }
    }
}

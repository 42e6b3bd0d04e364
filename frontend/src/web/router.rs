//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 当前视图由状态机决定，路由服务只做两件事：
//! - 视图变化时同步地址栏
//! - 地址栏变化（首次加载、后退/前进）时向状态机请求切换视图，被拒绝则改回地址栏

use leptos::prelude::*;
use log::{debug, info};
use wasm_bindgen::prelude::*;

use super::route::AppRoute;
use crate::state::View;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过注入视图信号与视图请求回调实现与状态机的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（由视图与 not_found 派生）
    current_route: Memo<AppRoute>,
    /// 地址栏指向未知路径
    not_found: RwSignal<bool>,
    /// 当前视图（注入的信号）
    view: Signal<View>,
    /// 请求切换视图（注入的回调，是否接受由状态机决定）
    request_view: Callback<View>,
}

impl RouterService {
    fn new(view: Signal<View>, request_view: Callback<View>) -> Self {
        let not_found = RwSignal::new(false);
        let current_route = Memo::new(move |_| {
            if not_found.get() {
                AppRoute::NotFound
            } else {
                AppRoute::from(view.get())
            }
        });

        Self {
            current_route,
            not_found,
            view,
            request_view,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> Memo<AppRoute> {
        self.current_route
    }

    /// 从 404 页返回当前视图
    pub fn leave_not_found(&self) {
        self.not_found.set(false);
    }

    /// 按地址栏路径请求视图
    ///
    /// 返回实际生效的路由；与请求不一致时说明被状态机拒绝。
    fn follow_path(&self, path: &str) -> AppRoute {
        let target = AppRoute::from_path(path);
        let Some(view) = target.view() else {
            info!("[Router] unknown path {}", path);
            self.not_found.set(true);
            return AppRoute::NotFound;
        };

        self.not_found.set(false);
        if self.view.get_untracked() != view {
            self.request_view.run(view);
        }
        AppRoute::from(self.view.get_untracked())
    }

    /// 首次加载：按当前路径请求视图，随后以视图为准修正地址栏
    fn init_from_location(&self) {
        let path = current_path();
        let route = self.follow_path(&path);
        if route != AppRoute::NotFound && AppRoute::from_path(&path) != route {
            debug!("[Router] {} is not reachable, showing {}", path, route);
            replace_history_state(route.to_path());
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let route = router.follow_path(&path);

            // 守卫：状态机拒绝了请求的视图，地址栏改回实际视图
            if route != AppRoute::NotFound && AppRoute::from_path(&path) != route {
                debug!("[Router] popstate to {} rejected, staying on {}", path, route);
                replace_history_state(route.to_path());
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 视图变化时同步地址栏
    fn setup_location_sync(&self) {
        let current_route = self.current_route;

        Effect::new(move |_| {
            let route = current_route.get();
            if route == AppRoute::NotFound {
                return;
            }
            if AppRoute::from_path(&current_path()) != route {
                debug!("[Router] view changed, pushing {}", route);
                push_history_state(route.to_path());
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(view: Signal<View>, request_view: Callback<View>) -> RouterService {
    let router = RouterService::new(view, request_view);

    router.init_from_location();
    router.init_popstate_listener();
    router.setup_location_sync();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 当前视图
    view: Signal<View>,
    /// 请求切换视图
    request_view: Callback<View>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(view, request_view);

    children()
}

/// 路由出口组件
///
/// 根据当前路由渲染对应的组件；路由不变时不重新挂载。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

//! 学术资源门户前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `state`: 应用状态机（纯逻辑，不依赖浏览器）
//! - `api` / `session`: 后端调用与会话持久化
//! - `sync` / `store`: 执行状态机产出的副作用（测试驱动 / 浏览器驱动）
//! - `web::route` / `web::router`: 路由定义与路由服务
//! - `components`: UI 组件层

pub mod api;
pub mod config;
mod components {
    pub mod dashboard;
    pub mod login;
    pub mod register;
    pub mod toast;
}
mod messages;
pub mod session;
pub mod state;
pub mod store;
pub mod sync;

use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::toast::Toast;
use crate::config::AppConfig;
use crate::state::View;
use crate::store::PortalStore;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub mod web {
    pub mod console;
    pub mod file;
    pub mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet, use_router};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::NotFound => {
            let router = use_router();
            view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <div class="text-center">
                        <h1 class="text-6xl font-bold text-error">"404"</h1>
                        <p class="text-xl mt-4">"Página no encontrada"</p>
                        <button class="btn btn-primary mt-6" on:click=move |_| router.leave_not_found()>
                            "Volver al portal"
                        </button>
                    </div>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建期配置
    let config = AppConfig::from_build_env();

    // 2. 创建状态并恢复会话（必须早于路由初始化）
    let store = PortalStore::new(&config);
    provide_context(config);
    provide_context(store);
    store.init();

    // 3. 注入视图信号与视图请求回调（解耦！）
    let view = store.view();
    let request_view = Callback::new(move |view: View| store.request_view(view));

    view! {
        <Router view=view request_view=request_view>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <Toast />
    }
}

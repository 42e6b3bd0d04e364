use crate::store::use_store;
use leptos::prelude::*;

/// 当前提示条；为空时不渲染
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_store().state();
    let alert = move || state.with(|s| s.alert().cloned());

    move || {
        alert().map(|alert| {
            let class = if alert.is_success() {
                "alert alert-success shadow-lg"
            } else {
                "alert alert-error shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div role="alert" class=class>
                        <span>{alert.text}</span>
                    </div>
                </div>
            }
        })
    }
}

use crate::state::{Action, LoginField, Operation};
use crate::store::use_store;
use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = use_store();
    let state = store.state();

    let email = move || state.with(|s| s.login.email.clone());
    let password = move || state.with(|s| s.login.password.clone());
    let is_busy = move || state.with(|s| s.is_busy());
    let is_submitting = move || state.with(|s| s.busy() == Some(Operation::Login));

    // 回车提交由 form 的 submit 事件完成
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        store.dispatch(Action::SubmitLogin);
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Portal Académico"</h1>
                    <p class="text-base-content/70">
                        "Inicia sesión para gestionar tus recursos"
                    </p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <div class="form-control">
                            <label class="label" for="login-email">
                                <span class="label-text">"Correo"</span>
                            </label>
                            <input
                                id="login-email"
                                type="email"
                                placeholder="usuario@ejemplo.com"
                                on:input=move |ev| {
                                    store.dispatch(Action::EditLogin(LoginField::Email, event_target_value(&ev)))
                                }
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="login-password">
                                <span class="label-text">"Contraseña"</span>
                            </label>
                            <input
                                id="login-password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| {
                                    store.dispatch(Action::EditLogin(LoginField::Password, event_target_value(&ev)))
                                }
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_busy>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Ingresando..." }.into_any()
                                } else {
                                    "Iniciar Sesión".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "¿No tienes cuenta? "
                            <a class="link link-primary" on:click=move |_| store.dispatch(Action::ShowRegister)>
                                "Regístrate"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

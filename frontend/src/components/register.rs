use crate::state::{Action, Operation, RegisterField};
use crate::store::use_store;
use leptos::prelude::*;
use portal_shared::Role;

/// 文本输入框，内容变化时更新注册表单的对应字段
#[component]
fn RegisterInput(
    field: RegisterField,
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
) -> impl IntoView {
    let store = use_store();
    let state = store.state();

    let value = move || {
        state.with(|s| match field {
            RegisterField::Username => s.register.username.clone(),
            RegisterField::Email => s.register.email.clone(),
            RegisterField::Password => s.register.password.clone(),
            RegisterField::ConfirmPassword => s.register.confirm_password.clone(),
        })
    };

    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=input_type
                placeholder=placeholder
                on:input=move |ev| store.dispatch(Action::EditRegister(field, event_target_value(&ev)))
                prop:value=value
                class="input input-bordered"
            />
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let store = use_store();
    let state = store.state();

    let role = move || state.with(|s| s.register.role.as_str().to_string());
    let is_busy = move || state.with(|s| s.is_busy());
    let is_submitting = move || state.with(|s| s.busy() == Some(Operation::Register));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        store.dispatch(Action::SubmitRegister);
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Crear Cuenta"</h1>
                    <p class="text-base-content/70">"Registro de usuario"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <RegisterInput
                            field=RegisterField::Username
                            id="register-username"
                            label="Usuario"
                            input_type="text"
                            placeholder="Tu nombre"
                        />
                        <RegisterInput
                            field=RegisterField::Email
                            id="register-email"
                            label="Correo"
                            input_type="email"
                            placeholder="usuario@ejemplo.com"
                        />
                        <RegisterInput
                            field=RegisterField::Password
                            id="register-password"
                            label="Contraseña"
                            input_type="password"
                            placeholder="Mínimo 6 caracteres"
                        />
                        <RegisterInput
                            field=RegisterField::ConfirmPassword
                            id="register-confirm"
                            label="Confirmar Contraseña"
                            input_type="password"
                            placeholder="Repite tu contraseña"
                        />

                        <div class="form-control">
                            <label class="label" for="register-role">
                                <span class="label-text">"Rol"</span>
                            </label>
                            <select
                                id="register-role"
                                class="select select-bordered"
                                on:change=move |ev| {
                                    store.dispatch(Action::SelectRole(Role::from_value(&event_target_value(&ev))))
                                }
                                prop:value=role
                            >
                                <option value="client">"Cliente"</option>
                                <option value="admin">"Administrador"</option>
                            </select>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_busy>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Registrando..." }.into_any()
                                } else {
                                    "Registrar".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "¿Ya tienes cuenta? "
                            <a class="link link-primary" on:click=move |_| store.dispatch(Action::ShowLogin)>
                                "Inicia sesión"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

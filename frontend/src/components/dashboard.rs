mod resource_list;
mod upload_form;

use crate::state::Action;
use crate::store::use_store;
use leptos::prelude::*;
use resource_list::ResourceList;
use upload_form::UploadForm;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_store();
    let state = store.state();

    let username = move || {
        state.with(|s| s.session().map(|u| u.username.clone()).unwrap_or_default())
    };

    let on_logout = move |_| store.dispatch(Action::Logout);

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 flex-col items-start px-2">
                        <span class="text-xl font-bold">"Portal Académico"</span>
                        <span class="text-sm text-base-content/70">
                            "Bienvenido, " {username}
                        </span>
                    </div>
                    <div class="flex-none">
                        <button on:click=on_logout class="btn btn-outline btn-error">
                            "Cerrar Sesión"
                        </button>
                    </div>
                </div>

                <UploadForm />
                <ResourceList />
            </div>
        </div>
    }
}

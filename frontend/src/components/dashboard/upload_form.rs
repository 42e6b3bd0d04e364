use crate::state::{Action, Operation};
use crate::store::use_store;
use crate::web::file::read_file;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys::HtmlInputElement;
use log::warn;
use portal_shared::Category;

const ACCEPTED_FILES: &str = "image/*,video/*,.pdf,.doc,.docx";

#[component]
pub fn UploadForm() -> impl IntoView {
    let store = use_store();
    let state = store.state();
    let file_input = NodeRef::<leptos::html::Input>::new();

    let categories = move || {
        state.with(|s| {
            s.dashboard()
                .map(|d| d.categories.clone())
                .unwrap_or_default()
        })
    };
    let selected_name = move || {
        state.with(|s| {
            s.dashboard()
                .and_then(|d| d.upload.file.as_ref().map(|f| f.name.clone()))
        })
    };
    let category_id = move || {
        state.with(|s| {
            s.dashboard()
                .map(|d| d.upload.category_id.clone())
                .unwrap_or_default()
        })
    };
    let is_busy = move || state.with(|s| s.is_busy());
    let is_uploading = move || state.with(|s| s.busy() == Some(Operation::Upload));

    // 草稿被重置（上传成功）后清空文件选择框
    Effect::new(move |_| {
        if selected_name().is_none() {
            if let Some(input) = file_input.get() {
                input.set_value("");
            }
        }
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            store.dispatch(Action::SelectUploadFile(None));
            return;
        };

        spawn_local(async move {
            match read_file(&file).await {
                Ok(upload) => store.dispatch(Action::SelectUploadFile(Some(upload))),
                Err(e) => {
                    warn!("reading {} failed: {}", file.name(), e);
                    store.dispatch(Action::SelectUploadFile(None));
                }
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">"Subir Recurso"</h3>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <div class="form-control">
                        <label class="label" for="upload-file">
                            <span class="label-text">"Archivo"</span>
                        </label>
                        <input
                            id="upload-file"
                            type="file"
                            accept=ACCEPTED_FILES
                            class="file-input file-input-bordered w-full"
                            node_ref=file_input
                            on:change=on_file_change
                        />
                        {move || selected_name().map(|name| view! {
                            <span class="label-text-alt mt-1">"Seleccionado: " {name}</span>
                        })}
                    </div>

                    <div class="form-control">
                        <label class="label" for="upload-category">
                            <span class="label-text">"Categoría"</span>
                        </label>
                        <select
                            id="upload-category"
                            class="select select-bordered w-full"
                            on:change=move |ev| store.dispatch(Action::SelectUploadCategory(event_target_value(&ev)))
                            prop:value=category_id
                        >
                            <option value="">"Selecciona una categoría"</option>
                            <For
                                each=categories
                                key=|c: &Category| c.id
                                children=move |c: Category| view! {
                                    <option value=c.id.to_string()>{c.name}</option>
                                }
                            />
                        </select>
                    </div>
                </div>

                <div class="card-actions justify-end mt-4">
                    <button
                        class="btn btn-primary"
                        disabled=is_busy
                        on:click=move |_| store.dispatch(Action::SubmitUpload)
                    >
                        {move || if is_uploading() {
                            view! { <span class="loading loading-spinner"></span> "Subiendo..." }.into_any()
                        } else {
                            "Subir Archivo".into_any()
                        }}
                    </button>
                </div>
            </div>
        </div>
    }
}

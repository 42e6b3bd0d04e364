use crate::state::Action;
use crate::store::use_store;
use leptos::prelude::*;
use portal_shared::{Category, PreviewKind, Resource};

#[component]
fn ResourceCard(resource: Resource) -> impl IntoView {
    let store = use_store();
    let url = store.file_url(&resource.file_url);
    let date = resource.display_date();

    let preview = match resource.preview_kind() {
        PreviewKind::Image => Some(
            view! { <img class="rounded-lg max-h-48 object-cover w-full" src=url.clone() alt=resource.title.clone() /> }
                .into_any(),
        ),
        PreviewKind::Video => Some(
            view! {
                <video class="rounded-lg max-h-48 w-full" controls>
                    <source src=url.clone() type=resource.content_type.clone().unwrap_or_default() />
                </video>
            }
            .into_any(),
        ),
        PreviewKind::None => None,
    };

    view! {
        <div class="card bg-base-200 shadow">
            <div class="card-body p-4 gap-2">
                <div class="flex items-center justify-between gap-2">
                    <strong class="truncate">{resource.title.clone()}</strong>
                    <small class="text-base-content/60 whitespace-nowrap">{date}</small>
                </div>
                <a class="btn btn-sm btn-outline" href=url target="_blank" rel="noreferrer">
                    "Ver / Descargar"
                </a>
                {preview}
            </div>
        </div>
    }
}

#[component]
pub fn ResourceList() -> impl IntoView {
    let store = use_store();
    let state = store.state();

    let categories = move || {
        state.with(|s| {
            s.dashboard()
                .map(|d| d.categories.clone())
                .unwrap_or_default()
        })
    };
    let filter = move || {
        state.with(|s| {
            s.dashboard()
                .map(|d| d.filter.as_value())
                .unwrap_or_default()
        })
    };
    let visible = Memo::new(move |_| {
        state.with(|s| {
            s.dashboard()
                .map(|d| d.visible_resources().into_iter().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex flex-wrap items-center justify-between gap-4">
                    <h3 class="card-title">"Mis Recursos"</h3>
                    <div class="flex items-center gap-2">
                        <label class="label-text" for="resource-filter">"Filtrar:"</label>
                        <select
                            id="resource-filter"
                            class="select select-bordered select-sm"
                            on:change=move |ev| store.dispatch(Action::SelectFilter(event_target_value(&ev)))
                            prop:value=filter
                        >
                            <option value={crate::state::ALL_CATEGORIES}>"Todas"</option>
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

                <Show
                    when=move || visible.with(|list| !list.is_empty())
                    fallback=|| view! {
                        <p class="text-center py-8 text-base-content/50">
                            "No tienes recursos aún. Sube tu primer archivo."
                        </p>
                    }
                >
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                        <For
                            each=move || visible.get()
                            key=|r: &Resource| r.id
                            children=move |r: Resource| view! { <ResourceCard resource=r /> }
                        />
                    </div>
                </Show>
            </div>
        </div>
    }
}

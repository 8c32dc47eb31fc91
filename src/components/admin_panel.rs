use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::query::{use_categories, use_projects, use_query_client, CATEGORIES, PROJECTS};
use crate::supabase::Supabase;
use crate::types::{next_display_order, NewCategory, Project, ProjectDraft};

// Not a security boundary: a casual-access deterrent compared in memory.
const ADMIN_PASSWORD: &str = "buildc3admin";

const STATUS_CLEAR_MS: u32 = 2_500;

#[derive(Clone, PartialEq)]
enum Status {
    Ok(String),
    Err(String),
}

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Projects,
    Categories,
}

#[derive(Properties, PartialEq)]
pub struct AdminPanelProps {
    pub open: bool,
    pub on_close: Callback<()>,
}

#[function_component(AdminPanel)]
pub fn admin_panel(props: &AdminPanelProps) -> Html {
    let authenticated = use_state(|| false);
    let password = use_state(String::new);
    let auth_error = use_state(|| false);
    let tab = use_state(|| Tab::Projects);

    if !props.open {
        return html! {};
    }

    // Closing the panel also drops the session: next open asks again.
    let close = {
        let authenticated = authenticated.clone();
        let password = password.clone();
        let auth_error = auth_error.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            authenticated.set(false);
            password.set(String::new());
            auth_error.set(false);
            on_close.emit(());
        })
    };

    if !*authenticated {
        let on_password = {
            let password = password.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                password.set(input.value());
            })
        };
        let on_submit = {
            let authenticated = authenticated.clone();
            let password = password.clone();
            let auth_error = auth_error.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                if *password == ADMIN_PASSWORD {
                    authenticated.set(true);
                    auth_error.set(false);
                } else {
                    auth_error.set(true);
                }
            })
        };

        return html! {
            <div class="admin-overlay">
                <div class="admin-dialog admin-gate">
                    <div class="admin-header">
                        <h2>{ "Access Required" }</h2>
                        <button class="admin-close" onclick={close}>{ "×" }</button>
                    </div>
                    <form onsubmit={on_submit}>
                        <input
                            type="password"
                            placeholder="Enter password..."
                            value={(*password).clone()}
                            oninput={on_password}
                        />
                        <button type="submit">{ "Enter" }</button>
                        { if *auth_error { html! { <p class="status-err">{ "Wrong password" }</p> } } else { html! {} } }
                    </form>
                </div>
            </div>
        };
    }

    let tab_button = |label: &str, value: Tab| {
        let tab = tab.clone();
        let class = if *tab == value { "tab active" } else { "tab" };
        let onclick = Callback::from(move |_| tab.set(value));
        html! { <button {class} {onclick}>{ label }</button> }
    };

    html! {
        <div class="admin-overlay">
            <div class="admin-dialog">
                <div class="admin-header">
                    <h2>{ "Admin Panel" }</h2>
                    <button class="admin-close" onclick={close}>{ "×" }</button>
                </div>
                <div class="admin-tabs">
                    { tab_button("Projects", Tab::Projects) }
                    { tab_button("Categories", Tab::Categories) }
                </div>
                {
                    match *tab {
                        Tab::Projects => html! { <ProjectsTab /> },
                        Tab::Categories => html! { <CategoriesTab /> },
                    }
                }
            </div>
        </div>
    }
}

/// Shows a transient status line; successes clear themselves, errors
/// stay until the next action.
fn set_status(status: &UseStateHandle<Option<Status>>, next: Status) {
    let clear_after_ok = matches!(next, Status::Ok(_));
    status.set(Some(next));
    if clear_after_ok {
        let status = status.clone();
        Timeout::new(STATUS_CLEAR_MS, move || status.set(None)).forget();
    }
}

fn status_line(status: &Option<Status>) -> Html {
    match status {
        Some(Status::Ok(msg)) => html! { <p class="status-ok">{ msg }</p> },
        Some(Status::Err(msg)) => html! { <p class="status-err">{ msg }</p> },
        None => html! {},
    }
}

#[function_component(ProjectsTab)]
fn projects_tab() -> Html {
    let client = use_query_client();
    let projects = use_projects(None, None);
    let categories = use_categories();

    let editing = use_state(|| None::<Project>);
    let adding = use_state(|| false);
    let form = use_state(ProjectDraft::default);
    let status = use_state(|| None::<Status>);

    let reset = {
        let editing = editing.clone();
        let adding = adding.clone();
        let form = form.clone();
        move || {
            editing.set(None);
            adding.set(false);
            form.set(ProjectDraft::default());
        }
    };

    let on_save = {
        let client = client.clone();
        let editing = editing.clone();
        let form = form.clone();
        let status = status.clone();
        let reset = reset.clone();
        Callback::from(move |_: MouseEvent| {
            let draft = (*form).clone();
            // Validation happens before any network call.
            if let Err(msg) = draft.validate() {
                set_status(&status, Status::Err(msg.to_string()));
                return;
            }
            let client = client.clone();
            let status = status.clone();
            let reset = reset.clone();
            let editing_project = (*editing).clone();
            spawn_local(async move {
                let backend = Supabase::from_env();
                let result = match &editing_project {
                    Some(p) => backend.update_project(&p.id, &draft).await,
                    None => backend.insert_project(&draft).await,
                };
                match result {
                    Ok(()) => {
                        let message = if editing_project.is_some() {
                            "Project updated"
                        } else {
                            "Project added"
                        };
                        set_status(&status, Status::Ok(message.to_string()));
                        client.invalidate(PROJECTS);
                        reset();
                    }
                    Err(err) => set_status(&status, Status::Err(err.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let client = client.clone();
        let status = status.clone();
        Callback::from(move |id: String| {
            let client = client.clone();
            let status = status.clone();
            spawn_local(async move {
                match Supabase::from_env().delete_project(&id).await {
                    Ok(()) => {
                        set_status(&status, Status::Ok("Deleted".to_string()));
                        client.invalidate(PROJECTS);
                    }
                    Err(err) => set_status(&status, Status::Err(err.to_string())),
                }
            });
        })
    };

    let start_edit = {
        let editing = editing.clone();
        let adding = adding.clone();
        let form = form.clone();
        Callback::from(move |p: Project| {
            form.set(ProjectDraft::from_project(&p));
            editing.set(Some(p));
            adding.set(true);
        })
    };

    let text_field = |apply: fn(&mut ProjectDraft, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let on_description = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            let mut next = (*form).clone();
            next.description = value;
            form.set(next);
        })
    };

    let on_category = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            let mut next = (*form).clone();
            next.category_id = value;
            form.set(next);
        })
    };

    let on_cancel = {
        let reset = reset.clone();
        Callback::from(move |_: MouseEvent| reset())
    };

    let on_add = {
        let adding = adding.clone();
        Callback::from(move |_: MouseEvent| adding.set(true))
    };

    html! {
        <div class="admin-tab-body">
            { status_line(&status) }
            {
                if *adding {
                    html! {
                        <div class="admin-form">
                            <input
                                placeholder="Title"
                                value={form.title.clone()}
                                oninput={text_field(|f, v| f.title = v)}
                            />
                            <textarea
                                placeholder="Description"
                                value={form.description.clone()}
                                oninput={on_description}
                            />
                            <select onchange={on_category}>
                                <option value="" selected={form.category_id.is_empty()}>
                                    { "Category" }
                                </option>
                                { for categories.data.iter().map(|c| html! {
                                    <option
                                        key={c.id.clone()}
                                        value={c.id.clone()}
                                        selected={form.category_id == c.id}
                                    >
                                        { &c.name }
                                    </option>
                                }) }
                            </select>
                            <input
                                placeholder="Thumbnail URL"
                                value={form.thumbnail_url.clone()}
                                oninput={text_field(|f, v| f.thumbnail_url = v)}
                            />
                            <input
                                placeholder="External Link"
                                value={form.external_link.clone()}
                                oninput={text_field(|f, v| f.external_link = v)}
                            />
                            <div class="admin-form-actions">
                                <button onclick={on_save}>
                                    { if editing.is_some() { "Update" } else { "Add" } }
                                </button>
                                <button class="secondary" onclick={on_cancel}>{ "Cancel" }</button>
                            </div>
                        </div>
                    }
                } else {
                    html! { <button onclick={on_add}>{ "+ Add Project" }</button> }
                }
            }
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>{ "Title" }</th>
                        <th>{ "Category" }</th>
                        <th>{ "Actions" }</th>
                    </tr>
                </thead>
                <tbody>
                    { for projects.data.iter().map(|p| {
                        let edit = {
                            let start_edit = start_edit.clone();
                            let p = p.clone();
                            Callback::from(move |_| start_edit.emit(p.clone()))
                        };
                        let delete = {
                            let on_delete = on_delete.clone();
                            let id = p.id.clone();
                            Callback::from(move |_| on_delete.emit(id.clone()))
                        };
                        html! {
                            <tr key={p.id.clone()}>
                                <td>{ &p.title }</td>
                                <td>{ p.category.as_ref().map(|c| c.name.as_str()).unwrap_or("—") }</td>
                                <td>
                                    <button class="icon" onclick={edit}>{ "Edit" }</button>
                                    <button class="icon danger" onclick={delete}>{ "Delete" }</button>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        </div>
    }
}

#[function_component(CategoriesTab)]
fn categories_tab() -> Html {
    let client = use_query_client();
    let categories = use_categories();
    let name = use_state(String::new);
    let status = use_state(|| None::<Status>);

    let on_name = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_add = {
        let client = client.clone();
        let name = name.clone();
        let status = status.clone();
        let existing = categories.data.clone();
        Callback::from(move |_: MouseEvent| {
            let trimmed = name.trim().to_string();
            if trimmed.is_empty() {
                return;
            }
            let new = NewCategory {
                name: trimmed,
                display_order: next_display_order(&existing),
            };
            let client = client.clone();
            let name = name.clone();
            let status = status.clone();
            spawn_local(async move {
                match Supabase::from_env().insert_category(&new).await {
                    Ok(()) => {
                        set_status(&status, Status::Ok("Category added".to_string()));
                        name.set(String::new());
                        client.invalidate(CATEGORIES);
                    }
                    Err(err) => set_status(&status, Status::Err(err.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let client = client.clone();
        let status = status.clone();
        Callback::from(move |id: String| {
            let client = client.clone();
            let status = status.clone();
            spawn_local(async move {
                match Supabase::from_env().delete_category(&id).await {
                    Ok(()) => {
                        set_status(&status, Status::Ok("Deleted".to_string()));
                        client.invalidate(CATEGORIES);
                    }
                    Err(err) => set_status(&status, Status::Err(err.to_string())),
                }
            });
        })
    };

    html! {
        <div class="admin-tab-body">
            { status_line(&status) }
            <div class="admin-category-add">
                <input
                    placeholder="New category name"
                    value={(*name).clone()}
                    oninput={on_name}
                />
                <button onclick={on_add}>{ "+ Add" }</button>
            </div>
            <ul class="admin-category-list">
                { for categories.data.iter().map(|c| {
                    let delete = {
                        let on_delete = on_delete.clone();
                        let id = c.id.clone();
                        Callback::from(move |_| on_delete.emit(id.clone()))
                    };
                    html! {
                        <li key={c.id.clone()}>
                            <span>{ &c.name }</span>
                            <button class="icon danger" onclick={delete}>{ "Delete" }</button>
                        </li>
                    }
                }) }
            </ul>
        </div>
    }
}

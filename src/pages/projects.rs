use yew::prelude::*;

use crate::components::{AdminPanel, CategoryBar, MasonryGrid, Navbar};

#[function_component(Projects)]
pub fn projects() -> Html {
    let search = use_state(String::new);
    let selected = use_state(|| None::<String>);
    let admin_open = use_state(|| false);

    let on_search_change = {
        let search = search.clone();
        Callback::from(move |value: String| search.set(value))
    };

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |value: Option<String>| selected.set(value))
    };

    let on_secret_trigger = {
        let admin_open = admin_open.clone();
        Callback::from(move |_| admin_open.set(true))
    };

    let on_close = {
        let admin_open = admin_open.clone();
        Callback::from(move |_| admin_open.set(false))
    };

    // Empty search means no title filter at all.
    let search_filter = if search.is_empty() {
        None
    } else {
        Some((*search).clone())
    };

    html! {
        <div class="projects-page">
            <Navbar
                search={(*search).clone()}
                {on_search_change}
                {on_secret_trigger}
            />
            <CategoryBar selected={(*selected).clone()} {on_select} />
            <main>
                <MasonryGrid category_id={(*selected).clone()} search={search_filter} />
            </main>
            <AdminPanel open={*admin_open} {on_close} />
        </div>
    }
}

use yew::prelude::*;

use crate::query::use_categories;

#[derive(Properties, PartialEq)]
pub struct CategoryBarProps {
    pub selected: Option<String>,
    /// `None` selects the implicit "All" chip.
    pub on_select: Callback<Option<String>>,
}

#[function_component(CategoryBar)]
pub fn category_bar(props: &CategoryBarProps) -> Html {
    let categories = use_categories();

    let chip_class = |active: bool| {
        if active {
            "category-chip active"
        } else {
            "category-chip"
        }
    };

    let on_all = {
        let on_select = props.on_select.clone();
        Callback::from(move |_| on_select.emit(None))
    };

    html! {
        <div class="category-bar">
            <button class={chip_class(props.selected.is_none())} onclick={on_all}>
                { "All" }
            </button>
            {
                for categories.data.iter().map(|cat| {
                    let id = cat.id.clone();
                    let on_click = {
                        let on_select = props.on_select.clone();
                        let id = id.clone();
                        Callback::from(move |_| on_select.emit(Some(id.clone())))
                    };
                    html! {
                        <button
                            key={cat.id.clone()}
                            class={chip_class(props.selected.as_deref() == Some(id.as_str()))}
                            onclick={on_click}
                        >
                            { &cat.name }
                        </button>
                    }
                })
            }
        </div>
    }
}

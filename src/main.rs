use wasm_bindgen::JsCast;
use web_sys::{window, HtmlElement};
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod pages;
pub mod query;
pub mod routes;
pub mod scroll_engine;
pub mod supabase;
pub mod types;

use crate::query::QueryProvider;
use crate::routes::{switch, Route};

const STYLE: &str = include_str!("../styles/style.css");

fn inject_css(css: &str) {
    let document = window().unwrap().document().unwrap();
    let head = document.head().unwrap();

    let style = document
        .create_element("style")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();

    style.set_inner_html(css);
    head.append_child(&style).unwrap();
}

#[function_component(App)]
fn app() -> Html {
    use_effect_with((), |_| {
        inject_css(STYLE);
        || ()
    });

    html! {
        <QueryProvider>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </QueryProvider>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::ParallaxSlider;
use crate::query::use_projects;
use crate::routes::Route;

#[derive(Properties, PartialEq)]
pub struct ProjectDetailProps {
    pub id: String,
}

/// Hosts the slider over the full ordered catalog, seeded at the
/// requested project.
#[function_component(ProjectDetail)]
pub fn project_detail(props: &ProjectDetailProps) -> Html {
    let navigator = use_navigator().expect("router not mounted");
    let projects = use_projects(None, None);

    let on_back = {
        Callback::from(move |_| navigator.push(&Route::Projects))
    };

    if projects.loading {
        return html! { <div class="detail-loading" /> };
    }

    let start_index = projects.data.iter().position(|p| p.id == props.id);

    match start_index {
        Some(index) => {
            let list = Rc::new(projects.data);
            html! { <ParallaxSlider projects={list} start_index={index} /> }
        }
        None => html! {
            <div class="detail-empty">
                <p>{ "Project not found" }</p>
                <button onclick={on_back}>{ "← Back" }</button>
            </div>
        },
    }
}

use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;
use crate::types::Project;

#[derive(Properties, PartialEq)]
pub struct ProjectCardProps {
    pub project: Project,
}

#[function_component(ProjectCard)]
pub fn project_card(props: &ProjectCardProps) -> Html {
    let navigator = use_navigator().expect("router not mounted");
    let project = &props.project;

    let on_click = {
        let navigator = navigator.clone();
        let id = project.id.clone();
        Callback::from(move |_| {
            navigator.push(&Route::ProjectDetail { id: id.clone() });
        })
    };

    html! {
        <div class="project-card" onclick={on_click}>
            {
                if project.thumbnail_url.is_empty() {
                    html! {
                        <div class="project-card-placeholder">
                            <span>{ &project.title }</span>
                        </div>
                    }
                } else {
                    html! {
                        <img
                            src={project.thumbnail_url.clone()}
                            alt={project.title.clone()}
                            loading="lazy"
                        />
                    }
                }
            }
            <div class="project-card-body">
                <h3>{ &project.title }</h3>
                {
                    if let Some(category) = &project.category {
                        html! { <span class="badge">{ &category.name }</span> }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

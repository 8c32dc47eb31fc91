use yew::prelude::*;

pub mod home;
pub mod project_detail;
pub mod projects;

pub use home::Home;
pub use project_detail::ProjectDetail;
pub use projects::Projects;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! { <h1>{ "404 - Page Not Found" }</h1> }
}

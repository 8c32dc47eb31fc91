use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::*;

#[derive(Routable, PartialEq, Eq, Clone, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/projects")]
    Projects,
    #[at("/project/:id")]
    ProjectDetail { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Projects => html! { <Projects /> },
        Route::ProjectDetail { id } => html! { <ProjectDetail {id} /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <main class="home-hero">
            <h1>{ "BUILDC3" }</h1>
            <p>{ "in, with and for the community" }</p>
            <Link<Route> to={Route::Projects} classes="home-enter">
                { "Browse Projects" }
            </Link<Route>>
        </main>
    }
}

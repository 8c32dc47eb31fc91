use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Rolling log of logo clicks. Five clicks inside a two-second window
/// fire the trigger and reset the log.
#[derive(Default)]
pub struct ClickLog {
    timestamps: Vec<f64>,
}

const CLICK_WINDOW_MS: f64 = 2_000.0;
const CLICK_THRESHOLD: usize = 5;

impl ClickLog {
    pub fn register(&mut self, now_ms: f64) -> bool {
        self.timestamps.push(now_ms);
        self.timestamps.retain(|t| now_ms - t < CLICK_WINDOW_MS);
        if self.timestamps.len() >= CLICK_THRESHOLD {
            self.timestamps.clear();
            true
        } else {
            false
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub search: String,
    pub on_search_change: Callback<String>,
    /// Fired by the hidden logo-click sequence; opens the admin panel.
    pub on_secret_trigger: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let clicks = use_mut_ref(ClickLog::default);

    let on_logo_click = {
        let clicks = clicks.clone();
        let on_secret_trigger = props.on_secret_trigger.clone();
        Callback::from(move |_| {
            if clicks.borrow_mut().register(js_sys::Date::now()) {
                on_secret_trigger.emit(());
            }
        })
    };

    let on_input = {
        let on_search_change = props.on_search_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_search_change.emit(input.value());
        })
    };

    html! {
        <nav class="navbar">
            <button class="navbar-logo" onclick={on_logo_click}>{ "BUILDC3" }</button>
            <span class="navbar-tagline">{ "in, with and for the community" }</span>
            <input
                class="navbar-search"
                type="search"
                placeholder="Search projects..."
                value={props.search.clone()}
                oninput={on_input}
            />
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_quick_clicks_fire_once_and_reset() {
        let mut log = ClickLog::default();
        for i in 0..4 {
            assert!(!log.register(i as f64 * 100.0));
        }
        assert!(log.register(400.0));
        // log was cleared, the next click starts over
        assert!(!log.register(450.0));
    }

    #[test]
    fn slow_clicks_never_fire() {
        let mut log = ClickLog::default();
        for i in 0..20 {
            assert!(!log.register(i as f64 * 600.0));
        }
    }

    #[test]
    fn stale_clicks_age_out_of_the_window() {
        let mut log = ClickLog::default();
        log.register(0.0);
        log.register(100.0);
        log.register(200.0);
        // 2s later only the new clicks count
        assert!(!log.register(2_300.0));
        assert!(!log.register(2_350.0));
        assert!(!log.register(2_400.0));
        assert!(!log.register(2_450.0));
        assert!(log.register(2_500.0));
    }
}

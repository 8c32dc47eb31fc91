//! Yew side of the detail slider: listener registration, the animation
//! frame loop, and the per-frame transform writes. Everything that can
//! be computed without a DOM lives in [`crate::scroll_engine`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::Datelike;
use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, TouchEvent, WheelEvent};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;
use crate::scroll_engine::{
    parallax_target, slot_number, wrap_index, ParallaxTracker, ScrollEngine, BUFFER_SIZE,
};
use crate::types::Project;

const MINIMAP_HEIGHT: f64 = 250.0;

#[derive(Properties, PartialEq)]
pub struct ParallaxSliderProps {
    pub projects: Rc<Vec<Project>>,
    #[prop_or_default]
    pub start_index: usize,
}

fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0)
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

fn project_at(projects: &[Project], index: i64) -> Option<&Project> {
    if projects.is_empty() {
        return None;
    }
    Some(&projects[wrap_index(index, projects.len())])
}

fn set_translate(node: &NodeRef, y: f64) {
    if let Some(el) = node.cast::<HtmlElement>() {
        let _ = el
            .style()
            .set_property("transform", &format!("translateY({y}px)"));
    }
}

/// Eases the slot's inner image toward its parallax target and writes
/// the transform, skipping the write once the tracker has converged.
fn apply_parallax(
    node: &NodeRef,
    trackers: &mut HashMap<i64, ParallaxTracker>,
    index: i64,
    scroll_y: f64,
    height: f64,
) {
    let Some(el) = node.cast::<HtmlElement>() else { return };
    let Ok(Some(img)) = el.query_selector("img") else { return };
    let tracker = trackers.entry(index).or_default();
    if let Some(offset) = tracker.advance(parallax_target(scroll_y, index, height)) {
        if let Some(img) = img.dyn_ref::<HtmlElement>() {
            let _ = img
                .style()
                .set_property("transform", &format!("translateY({offset}px) scale(1.5)"));
        }
    }
}

/// Everything the frame loop needs, shared between the closure chain and
/// the teardown.
struct FrameLoop {
    engine: Rc<RefCell<ScrollEngine>>,
    raf: RefCell<Option<AnimationFrame>>,
    project_refs: Rc<RefCell<HashMap<i64, NodeRef>>>,
    minimap_refs: Rc<RefCell<HashMap<i64, NodeRef>>>,
    info_refs: Rc<RefCell<HashMap<i64, NodeRef>>>,
    parallax: RefCell<HashMap<i64, ParallaxTracker>>,
    minimap_parallax: RefCell<HashMap<i64, ParallaxTracker>>,
    window_state: UseStateHandle<(i64, i64)>,
    active_state: UseStateHandle<usize>,
    last_window: Cell<(i64, i64)>,
    last_active: Cell<usize>,
}

impl FrameLoop {
    fn run(&self) {
        let frame = self.engine.borrow_mut().frame(now_ms());

        {
            let engine = self.engine.borrow();
            let current_y = engine.current_y();
            let height = engine.item_height();
            let minimap_y = current_y * MINIMAP_HEIGHT / height;

            for (&i, node) in self.project_refs.borrow().iter() {
                set_translate(node, engine.offset_for(i));
                apply_parallax(node, &mut self.parallax.borrow_mut(), i, current_y, height);
            }
            for (&i, node) in self.minimap_refs.borrow().iter() {
                set_translate(node, i as f64 * MINIMAP_HEIGHT + minimap_y);
                apply_parallax(
                    node,
                    &mut self.minimap_parallax.borrow_mut(),
                    i,
                    minimap_y,
                    MINIMAP_HEIGHT,
                );
            }
            for (&i, node) in self.info_refs.borrow().iter() {
                set_translate(node, i as f64 * MINIMAP_HEIGHT + minimap_y);
            }
        }

        // Only coarse changes cross back into the declarative layer.
        if frame.window != self.last_window.get() {
            self.last_window.set(frame.window);
            self.window_state.set(frame.window);
        }
        if frame.active_index != self.last_active.get() {
            self.last_active.set(frame.active_index);
            self.active_state.set(frame.active_index);
        }
    }
}

fn schedule(frame_loop: Rc<FrameLoop>) {
    let next = frame_loop.clone();
    *frame_loop.raf.borrow_mut() = Some(request_animation_frame(move |_| {
        next.run();
        schedule(next.clone());
    }));
}

#[function_component(ParallaxSlider)]
pub fn parallax_slider(props: &ParallaxSliderProps) -> Html {
    let navigator = use_navigator().expect("router not mounted");
    let projects = props.projects.clone();
    let start_index = props.start_index;

    let engine = use_mut_ref(|| {
        ScrollEngine::new(projects.len(), start_index, viewport_height(), now_ms())
    });
    let window_state = use_state(|| {
        (
            start_index as i64 - BUFFER_SIZE,
            start_index as i64 + BUFFER_SIZE,
        )
    });
    let active_state = use_state(|| start_index);
    let project_refs = use_mut_ref(HashMap::<i64, NodeRef>::new);
    let minimap_refs = use_mut_ref(HashMap::<i64, NodeRef>::new);
    let info_refs = use_mut_ref(HashMap::<i64, NodeRef>::new);

    {
        let engine = engine.clone();
        let window_state = window_state.clone();
        let active_state = active_state.clone();
        let project_refs = project_refs.clone();
        let minimap_refs = minimap_refs.clone();
        let info_refs = info_refs.clone();
        let item_count = projects.len();
        use_effect_with((item_count, start_index), move |&(item_count, start_index)| {
            *engine.borrow_mut() =
                ScrollEngine::new(item_count, start_index, viewport_height(), now_ms());

            let window = web_sys::window().expect("no window");

            let wheel = {
                let engine = engine.clone();
                let options = EventListenerOptions::enable_prevent_default();
                EventListener::new_with_options(&window, "wheel", options, move |event| {
                    if let Some(event) = event.dyn_ref::<WheelEvent>() {
                        event.prevent_default();
                        engine.borrow_mut().wheel(event.delta_y(), now_ms());
                    }
                })
            };

            let touch_start = {
                let engine = engine.clone();
                EventListener::new(&window, "touchstart", move |event| {
                    if let Some(event) = event.dyn_ref::<TouchEvent>() {
                        if let Some(touch) = event.touches().get(0) {
                            engine
                                .borrow_mut()
                                .touch_start(touch.client_y() as f64, now_ms());
                        }
                    }
                })
            };

            let touch_move = {
                let engine = engine.clone();
                EventListener::new(&window, "touchmove", move |event| {
                    if let Some(event) = event.dyn_ref::<TouchEvent>() {
                        if let Some(touch) = event.touches().get(0) {
                            engine
                                .borrow_mut()
                                .touch_move(touch.client_y() as f64, now_ms());
                        }
                    }
                })
            };

            let touch_end = {
                let engine = engine.clone();
                EventListener::new(&window, "touchend", move |_| {
                    engine.borrow_mut().touch_end();
                })
            };

            let resize = {
                let engine = engine.clone();
                EventListener::new(&window, "resize", move |_| {
                    engine.borrow_mut().resize(viewport_height());
                })
            };

            let frame_loop = Rc::new(FrameLoop {
                engine,
                raf: RefCell::new(None),
                project_refs,
                minimap_refs,
                info_refs,
                parallax: RefCell::new(HashMap::new()),
                minimap_parallax: RefCell::new(HashMap::new()),
                window_state,
                active_state,
                last_window: Cell::new((
                    start_index as i64 - BUFFER_SIZE,
                    start_index as i64 + BUFFER_SIZE,
                )),
                last_active: Cell::new(start_index),
            });
            schedule(frame_loop.clone());

            move || {
                // Dropping the pending frame stops the loop; listeners
                // detach when their handles drop.
                frame_loop.raf.borrow_mut().take();
                drop(wheel);
                drop(touch_start);
                drop(touch_move);
                drop(touch_end);
                drop(resize);
            }
        });
    }

    let (min, max) = *window_state;

    // Keep one NodeRef per rendered slot, dropping the ones that slid
    // out of the window.
    {
        let mut refs = project_refs.borrow_mut();
        refs.retain(|&i, _| i >= min && i <= max);
        let mut mini = minimap_refs.borrow_mut();
        mini.retain(|&i, _| i >= min && i <= max);
        let mut info = info_refs.borrow_mut();
        info.retain(|&i, _| i >= min && i <= max);
        for i in min..=max {
            refs.entry(i).or_insert_with(NodeRef::default);
            mini.entry(i).or_insert_with(NodeRef::default);
            info.entry(i).or_insert_with(NodeRef::default);
        }
    }

    let active_project = projects.get(*active_state);

    let on_back = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::Projects))
    };

    let step = |delta: i64| {
        let engine = engine.clone();
        Callback::from(move |_: MouseEvent| {
            engine.borrow_mut().step_by(delta, now_ms());
        })
    };

    html! {
        <div class="parallax-container">
            <div class="parallax-overlay-top">
                <button class="parallax-back" onclick={on_back}>{ "← Back" }</button>
                {
                    match active_project {
                        Some(p) if !p.external_link.is_empty() => html! {
                            <a
                                class="parallax-visit"
                                href={p.external_link.clone()}
                                target="_blank"
                                rel="noopener noreferrer"
                            >
                                { "Visit Project ↗" }
                            </a>
                        },
                        _ => html! {},
                    }
                }
            </div>

            <div class="parallax-overlay-bottom">
                {
                    if let Some(p) = active_project {
                        html! {
                            <div class="parallax-active-info">
                                <h1>{ &p.title }</h1>
                                { if p.description.is_empty() { html! {} } else { html! { <p>{ &p.description }</p> } } }
                                {
                                    if let Some(category) = &p.category {
                                        html! { <span class="badge">{ &category.name }</span> }
                                    } else {
                                        html! {}
                                    }
                                }
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>

            <ul class="project-list">
                { for (min..=max).filter_map(|i| {
                    let data = project_at(&projects, i)?;
                    let node = project_refs.borrow().get(&i).cloned().unwrap_or_default();
                    Some(html! {
                        <li key={i.to_string()} class="project-slot" ref={node}>
                            {
                                if data.thumbnail_url.is_empty() {
                                    html! {
                                        <div class="project-slot-placeholder">
                                            <span>{ &data.title }</span>
                                        </div>
                                    }
                                } else {
                                    html! { <img src={data.thumbnail_url.clone()} alt={data.title.clone()} /> }
                                }
                            }
                        </li>
                    })
                }) }
            </ul>

            <div class="minimap">
                <div class="minimap-preview">
                    { for (min..=max).filter_map(|i| {
                        let data = project_at(&projects, i)?;
                        let node = minimap_refs.borrow().get(&i).cloned().unwrap_or_default();
                        Some(html! {
                            <div key={i.to_string()} class="minimap-item" ref={node}>
                                {
                                    if data.thumbnail_url.is_empty() {
                                        html! { <div class="minimap-placeholder" /> }
                                    } else {
                                        html! { <img src={data.thumbnail_url.clone()} alt={data.title.clone()} /> }
                                    }
                                }
                            </div>
                        })
                    }) }
                </div>
                <div class="minimap-info">
                    { for (min..=max).filter_map(|i| {
                        let data = project_at(&projects, i)?;
                        let node = info_refs.borrow().get(&i).cloned().unwrap_or_default();
                        Some(html! {
                            <div key={i.to_string()} class="minimap-info-item" ref={node}>
                                <div class="minimap-info-row">
                                    <p>{ slot_number(i, projects.len()) }</p>
                                    <p>{ &data.title }</p>
                                </div>
                                <div class="minimap-info-row">
                                    <p>{ data.category.as_ref().map(|c| c.name.clone()).unwrap_or_default() }</p>
                                    <p>{ data.created_at.year() }</p>
                                </div>
                            </div>
                        })
                    }) }
                </div>
            </div>

            <div class="parallax-steps">
                <button onclick={step(-1)}>{ "Prev" }</button>
                <button onclick={step(1)}>{ "Next" }</button>
            </div>

            <div class="parallax-scroll-hint">
                <div class="parallax-scroll-line" />
                <p>{ "Scroll to explore" }</p>
            </div>
        </div>
    }
}

use gloo_events::EventListener;
use yew::prelude::*;

use crate::components::ProjectCard;
use crate::query::use_projects;

/// Round-robin distribution into N columns, Pinterest style, without
/// relying on CSS column support.
pub fn distribute<T: Clone>(items: &[T], columns: usize) -> Vec<Vec<T>> {
    let mut cols: Vec<Vec<T>> = vec![Vec::new(); columns.max(1)];
    for (i, item) in items.iter().enumerate() {
        cols[i % columns.max(1)].push(item.clone());
    }
    cols
}

pub fn column_count(viewport_width: f64) -> usize {
    if viewport_width >= 1280.0 {
        5
    } else if viewport_width >= 1024.0 {
        4
    } else if viewport_width >= 768.0 {
        3
    } else {
        2
    }
}

fn current_column_count() -> usize {
    let width = web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(1280.0);
    column_count(width)
}

#[derive(Properties, PartialEq)]
pub struct MasonryGridProps {
    pub category_id: Option<String>,
    pub search: Option<String>,
}

#[function_component(MasonryGrid)]
pub fn masonry_grid(props: &MasonryGridProps) -> Html {
    let projects = use_projects(props.category_id.clone(), props.search.clone());
    let columns = use_state(current_column_count);

    {
        let columns = columns.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no window");
            let listener = EventListener::new(&window, "resize", move |_| {
                columns.set(current_column_count());
            });
            move || drop(listener)
        });
    }

    if projects.loading {
        return html! {
            <div class="masonry-grid">
                {
                    for (0..*columns).map(|col| html! {
                        <div class="masonry-column" key={col}>
                            { for (0..2).map(|i| {
                                let height = 180 + ((col + i) % 4) * 60;
                                html! { <div class="skeleton" style={format!("height: {height}px;")} /> }
                            }) }
                        </div>
                    })
                }
            </div>
        };
    }

    if projects.data.is_empty() {
        return html! {
            <div class="empty-state">
                <p class="empty-title">{ "No projects found" }</p>
                <p class="empty-hint">{ "Try a different search or category" }</p>
            </div>
        };
    }

    let cols = distribute(&projects.data, *columns);

    html! {
        <div class="masonry-grid">
            {
                for cols.into_iter().enumerate().map(|(i, col)| html! {
                    <div class="masonry-column" key={i}>
                        { for col.into_iter().map(|project| html! {
                            <ProjectCard key={project.id.clone()} project={project.clone()} />
                        }) }
                    </div>
                })
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distributes_round_robin() {
        let cols = distribute(&[1, 2, 3, 4, 5, 6, 7], 3);
        assert_eq!(cols, vec![vec![1, 4, 7], vec![2, 5], vec![3, 6]]);
    }

    #[test]
    fn distribute_handles_fewer_items_than_columns() {
        let cols = distribute(&[1], 4);
        assert_eq!(cols, vec![vec![1], vec![], vec![], vec![]]);
    }

    #[test]
    fn column_count_follows_breakpoints() {
        assert_eq!(column_count(1440.0), 5);
        assert_eq!(column_count(1280.0), 5);
        assert_eq!(column_count(1100.0), 4);
        assert_eq!(column_count(800.0), 3);
        assert_eq!(column_count(500.0), 2);
    }
}

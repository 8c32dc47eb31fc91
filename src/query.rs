//! Read-through query hooks with cache invalidation.
//!
//! Reads are keyed by (entity, filters, epoch). Admin mutations bump the
//! entity's epoch through [`QueryClient`], which re-runs every hook that
//! listed it in its dependencies — a full refetch, never a local patch.

use std::collections::HashMap;
use std::rc::Rc;

use gloo_console::log;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::supabase::{ProjectFilter, Supabase, SupabaseError};
use crate::types::{Category, Project};

pub const PROJECTS: &str = "projects";
pub const CATEGORIES: &str = "categories";

#[derive(Clone, PartialEq, Default)]
struct Epochs(HashMap<&'static str, u64>);

enum EpochAction {
    Invalidate(&'static str),
}

impl Reducible for Epochs {
    type Action = EpochAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let EpochAction::Invalidate(key) = action;
        let mut next = (*self).clone();
        *next.0.entry(key).or_insert(0) += 1;
        Rc::new(next)
    }
}

#[derive(Clone, PartialEq)]
pub struct QueryClient {
    epochs: UseReducerHandle<Epochs>,
}

impl QueryClient {
    pub fn invalidate(&self, key: &'static str) {
        self.epochs.dispatch(EpochAction::Invalidate(key));
    }

    fn epoch(&self, key: &'static str) -> u64 {
        self.epochs.0.get(key).copied().unwrap_or(0)
    }
}

#[derive(Properties, PartialEq)]
pub struct QueryProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(QueryProvider)]
pub fn query_provider(props: &QueryProviderProps) -> Html {
    let epochs = use_reducer(Epochs::default);
    let client = QueryClient { epochs };

    html! {
        <ContextProvider<QueryClient> context={client}>
            { for props.children.iter() }
        </ContextProvider<QueryClient>>
    }
}

#[hook]
pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>().expect("QueryProvider not mounted")
}

#[derive(Clone, PartialEq)]
pub struct QueryResult<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<SupabaseError>,
}

/// Projects ordered newest-first, optionally narrowed to one category
/// and/or a case-insensitive title substring.
#[hook]
pub fn use_projects(
    category_id: Option<String>,
    search: Option<String>,
) -> QueryResult<Vec<Project>> {
    let client = use_query_client();
    let epoch = client.epoch(PROJECTS);

    let data = use_state(Vec::<Project>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<SupabaseError>);
    // Monotonic tag per issued request: a response that is no longer
    // current gets dropped, so the last issued request wins.
    let seq = use_mut_ref(|| 0u64);

    {
        let data = data.clone();
        let loading = loading.clone();
        let error = error.clone();
        let seq = seq.clone();
        use_effect_with(
            (category_id, search, epoch),
            move |(category_id, search, _)| {
                *seq.borrow_mut() += 1;
                let issued = *seq.borrow();
                let filter = ProjectFilter {
                    category_id: category_id.clone(),
                    search: search.clone(),
                };
                loading.set(true);
                spawn_local(async move {
                    let result = Supabase::from_env().fetch_projects(&filter).await;
                    if *seq.borrow() != issued {
                        return;
                    }
                    match result {
                        Ok(rows) => {
                            data.set(rows);
                            error.set(None);
                        }
                        Err(err) => {
                            log!(format!("projects fetch failed: {err}"));
                            data.set(Vec::new());
                            error.set(Some(err));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
        );
    }

    QueryResult {
        data: (*data).clone(),
        loading: *loading,
        error: (*error).clone(),
    }
}

/// Categories ordered by display order ascending.
#[hook]
pub fn use_categories() -> QueryResult<Vec<Category>> {
    let client = use_query_client();
    let epoch = client.epoch(CATEGORIES);

    let data = use_state(Vec::<Category>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<SupabaseError>);
    let seq = use_mut_ref(|| 0u64);

    {
        let data = data.clone();
        let loading = loading.clone();
        let error = error.clone();
        let seq = seq.clone();
        use_effect_with(epoch, move |_| {
            *seq.borrow_mut() += 1;
            let issued = *seq.borrow();
            loading.set(true);
            spawn_local(async move {
                let result = Supabase::from_env().fetch_categories().await;
                if *seq.borrow() != issued {
                    return;
                }
                match result {
                    Ok(rows) => {
                        data.set(rows);
                        error.set(None);
                    }
                    Err(err) => {
                        log!(format!("categories fetch failed: {err}"));
                        data.set(Vec::new());
                        error.set(Some(err));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    QueryResult {
        data: (*data).clone(),
        loading: *loading,
        error: (*error).clone(),
    }
}

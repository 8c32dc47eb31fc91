//! Minimal PostgREST client for the hosted backend. Two tables, no local
//! persistence; every read goes back to the server.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::types::{Category, NewCategory, Project, ProjectDraft};

pub fn supabase_url() -> &'static str {
    option_env!("SUPABASE_URL").unwrap_or("http://localhost:54321")
}

pub fn supabase_anon_key() -> &'static str {
    option_env!("SUPABASE_ANON_KEY").unwrap_or("dev-anon-key")
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SupabaseError {
    /// Non-2xx from the backend; carries the server's own message.
    #[error("{0}")]
    Backend(String),
    #[error("request failed: {0}")]
    Network(String),
}

fn net(err: gloo_net::Error) -> SupabaseError {
    SupabaseError::Network(err.to_string())
}

#[derive(Deserialize)]
struct PostgrestErrorBody {
    message: String,
}

/// The backend reports errors as JSON with a `message` field; fall back
/// to the bare status when the body is something else.
fn backend_message(status: u16, body: &str) -> String {
    serde_json::from_str::<PostgrestErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| format!("request failed with status {status}"))
}

const PROJECT_SELECT: &str = "*,category:categories(*)";

/// Read-side filters for the projects table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectFilter {
    pub category_id: Option<String>,
    pub search: Option<String>,
}

impl ProjectFilter {
    /// Query-string pairs in PostgREST syntax: joined category, newest
    /// first, optionally narrowed to one category and/or a
    /// case-insensitive title substring.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("select", PROJECT_SELECT.to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(id) = &self.category_id {
            pairs.push(("category_id", format!("eq.{id}")));
        }
        if let Some(search) = &self.search {
            pairs.push(("title", format!("ilike.*{search}*")));
        }
        pairs
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Supabase {
    base: String,
    anon_key: String,
}

impl Supabase {
    pub fn from_env() -> Self {
        Self::new(supabase_url(), supabase_anon_key())
    }

    pub fn new(base: &str, anon_key: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn get(&self, table: &str) -> RequestBuilder {
        self.auth(Request::get(&self.table_url(table)))
    }

    fn post(&self, table: &str) -> RequestBuilder {
        self.auth(Request::post(&self.table_url(table))).header("Prefer", "return=minimal")
    }

    fn patch(&self, table: &str) -> RequestBuilder {
        self.auth(Request::patch(&self.table_url(table))).header("Prefer", "return=minimal")
    }

    fn delete(&self, table: &str) -> RequestBuilder {
        self.auth(Request::delete(&self.table_url(table))).header("Prefer", "return=minimal")
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base, table)
    }

    fn auth(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
    }

    pub async fn fetch_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, SupabaseError> {
        let resp = self
            .get("projects")
            .query(filter.query_pairs())
            .send()
            .await
            .map_err(net)?;
        decode(resp).await
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>, SupabaseError> {
        let resp = self
            .get("categories")
            .query([("select", "*"), ("order", "display_order.asc")])
            .send()
            .await
            .map_err(net)?;
        decode(resp).await
    }

    pub async fn insert_project(&self, draft: &ProjectDraft) -> Result<(), SupabaseError> {
        let resp = self.post("projects").json(draft).map_err(net)?.send().await.map_err(net)?;
        check(resp).await
    }

    pub async fn update_project(&self, id: &str, draft: &ProjectDraft) -> Result<(), SupabaseError> {
        let resp = self
            .patch("projects")
            .query([("id", format!("eq.{id}"))])
            .json(draft)
            .map_err(net)?
            .send()
            .await
            .map_err(net)?;
        check(resp).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), SupabaseError> {
        let resp = self
            .delete("projects")
            .query([("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(net)?;
        check(resp).await
    }

    pub async fn insert_category(&self, new: &NewCategory) -> Result<(), SupabaseError> {
        let resp = self.post("categories").json(new).map_err(net)?.send().await.map_err(net)?;
        check(resp).await
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), SupabaseError> {
        let resp = self
            .delete("categories")
            .query([("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(net)?;
        check(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, SupabaseError> {
    if !resp.ok() {
        return Err(backend_error(resp).await);
    }
    resp.json::<T>().await.map_err(net)
}

async fn check(resp: Response) -> Result<(), SupabaseError> {
    if !resp.ok() {
        return Err(backend_error(resp).await);
    }
    Ok(())
}

async fn backend_error(resp: Response) -> SupabaseError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    SupabaseError::Backend(backend_message(status, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_query_defaults_to_join_and_newest_first() {
        let pairs = ProjectFilter::default().query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("select", "*,category:categories(*)".to_string()),
                ("order", "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn project_query_narrows_by_category_and_title() {
        let filter = ProjectFilter {
            category_id: Some("c-42".into()),
            search: Some("abc".into()),
        };
        let pairs = filter.query_pairs();
        assert!(pairs.contains(&("category_id", "eq.c-42".to_string())));
        assert!(pairs.contains(&("title", "ilike.*abc*".to_string())));
        // ordering clause survives the filters
        assert!(pairs.contains(&("order", "created_at.desc".to_string())));
    }

    #[test]
    fn backend_message_prefers_server_text() {
        let body = r#"{"message":"duplicate key value violates unique constraint","code":"23505"}"#;
        assert_eq!(
            backend_message(409, body),
            "duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn backend_message_falls_back_to_status() {
        assert_eq!(backend_message(500, "<html>oops</html>"), "request failed with status 500");
        assert_eq!(backend_message(404, ""), "request failed with status 404");
    }

    #[test]
    fn base_url_is_normalized() {
        let c = Supabase::new("https://x.supabase.co/", "k");
        assert_eq!(c.table_url("projects"), "https://x.supabase.co/rest/v1/projects");
    }
}

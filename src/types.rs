use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub thumbnail_url: String,
    pub external_link: String,
    pub created_at: DateTime<Utc>,
    /// Joined category, present when the query asks for it.
    #[serde(default)]
    pub category: Option<Category>,
}

/// Insert/update payload for a project. Everything except title and
/// category may stay empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub thumbnail_url: String,
    pub external_link: String,
}

impl ProjectDraft {
    pub fn from_project(p: &Project) -> Self {
        Self {
            title: p.title.clone(),
            description: p.description.clone(),
            category_id: p.category_id.clone(),
            thumbnail_url: p.thumbnail_url.clone(),
            external_link: p.external_link.clone(),
        }
    }

    /// Client-side gate: title and category are mandatory, everything
    /// else may be blank.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() || self.category_id.is_empty() {
            return Err("Title and category are required");
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub display_order: i32,
}

/// Display order for a category added on top of `existing`: one past the
/// current maximum, starting at 1 on an empty set.
pub fn next_display_order(existing: &[Category]) -> i32 {
    existing.iter().map(|c| c.display_order).max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn category(order: i32) -> Category {
        Category {
            id: format!("cat-{order}"),
            name: "x".into(),
            display_order: order,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn next_display_order_is_max_plus_one() {
        let cats: Vec<_> = [1, 3, 3, 7].into_iter().map(category).collect();
        assert_eq!(next_display_order(&cats), 8);
    }

    #[test]
    fn next_display_order_starts_at_one() {
        assert_eq!(next_display_order(&[]), 1);
    }

    #[test]
    fn draft_requires_title_and_category() {
        let mut draft = ProjectDraft {
            category_id: "c1".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_err());

        draft.title = "   ".into();
        assert!(draft.validate().is_err());

        draft.title = "Bridge".into();
        draft.category_id.clear();
        assert!(draft.validate().is_err());

        draft.category_id = "c1".into();
        assert!(draft.validate().is_ok());
        // the rest may stay empty
        assert!(draft.description.is_empty());
    }

    #[test]
    fn project_decodes_with_and_without_join() {
        let joined = r#"{
            "id": "p1",
            "title": "Community Hall",
            "description": "",
            "category_id": "c1",
            "thumbnail_url": "",
            "external_link": "",
            "created_at": "2024-05-01T12:00:00Z",
            "category": {
                "id": "c1",
                "name": "Architecture",
                "display_order": 1,
                "created_at": "2024-01-01T00:00:00Z"
            }
        }"#;
        let p: Project = serde_json::from_str(joined).expect("joined row");
        assert_eq!(p.category.as_ref().unwrap().name, "Architecture");

        let bare = r#"{
            "id": "p2",
            "title": "Kiosk",
            "description": "",
            "category_id": "c1",
            "thumbnail_url": "",
            "external_link": "",
            "created_at": "2024-05-02T12:00:00Z"
        }"#;
        let p: Project = serde_json::from_str(bare).expect("bare row");
        assert!(p.category.is_none());
    }
}

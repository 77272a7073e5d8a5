use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier of a blog post, backed by a ULID.
///
/// Identifiers sort by creation time and render as a 26 character
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(Ulid);

impl PostId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Parses an identifier from its string form.
    pub fn parse(raw: &str) -> Option<Self> {
        Ulid::from_string(raw).ok().map(Self)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author of a blog post, stored as separate name parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// The display name: both name parts joined with a space.
    /// Empty parts degrade gracefully, so ("", "Doe") renders as "Doe".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Validated input for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: Author,
}

/// A partial update to a post. Fields left as `None` keep their
/// current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
}

/// A stored blog post.
///
/// The id and creation timestamp are assigned by [`BlogPost::new`] and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    id: PostId,
    title: String,
    content: String,
    author: Author,
    created: DateTime<Utc>,
}

impl BlogPost {
    /// Creates a post from validated input, assigning its id and
    /// creation timestamp.
    pub fn new(new_post: NewPost) -> Self {
        Self {
            id: PostId::generate(),
            title: new_post.title,
            content: new_post.content,
            author: new_post.author,
            created: Utc::now(),
        }
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Applies a partial update; absent fields keep their values.
    pub fn apply_update(&mut self, update: PostUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
    }

    /// The externally visible representation of this post.
    pub fn api_repr(&self) -> PostRepr {
        PostRepr {
            id: self.id.to_string(),
            title: self.title.clone(),
            content: self.content.clone(),
            author: self.author.full_name(),
            created: self.created,
        }
    }
}

/// Wire representation of a post. The author appears as a single
/// flattened display name.
#[derive(Debug, Clone, Serialize)]
pub struct PostRepr {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use expect_test::expect;

    use super::*;

    fn fixed_post() -> BlogPost {
        BlogPost {
            id: PostId::parse("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap(),
            title: "Hello".to_string(),
            content: "First post".to_string(),
            author: Author {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            },
            created: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_post_id_round_trip() {
        let id = PostId::generate();
        let parsed = PostId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_post_id_rejects_malformed_input() {
        assert!(PostId::parse("").is_none());
        assert!(PostId::parse("not-a-ulid").is_none());
        assert!(PostId::parse("0123").is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let first = PostId::generate();
        let second = PostId::generate();
        assert_ne!(first, second);
    }

    #[test]
    fn test_post_id_serializes_as_string() {
        let id = PostId::parse("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""01ARZ3NDEKTSV4RRFFQ69G5FAV""#);
    }

    #[test]
    fn test_full_name_joins_and_trims() {
        let full = Author {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        };
        assert_eq!(full.full_name(), "Jane Doe");

        let first_only = Author {
            first_name: "Jane".to_string(),
            last_name: "".to_string(),
        };
        assert_eq!(first_only.full_name(), "Jane");

        let last_only = Author {
            first_name: "".to_string(),
            last_name: "Doe".to_string(),
        };
        assert_eq!(last_only.full_name(), "Doe");

        let empty = Author {
            first_name: "".to_string(),
            last_name: "".to_string(),
        };
        assert_eq!(empty.full_name(), "");
    }

    #[test]
    fn test_new_assigns_id_and_created() {
        let before = Utc::now();
        let post = BlogPost::new(NewPost {
            title: "Hello".to_string(),
            content: "First post".to_string(),
            author: Author {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            },
        });
        let after = Utc::now();
        assert_eq!(post.id().to_string().len(), 26);
        assert!(post.created() >= before);
        assert!(post.created() <= after);
    }

    #[test]
    fn test_apply_update_merges_present_fields() {
        let mut post = fixed_post();
        post.apply_update(PostUpdate {
            title: Some("Updated".to_string()),
            ..Default::default()
        });
        assert_eq!(post.title(), "Updated");
        assert_eq!(post.content(), "First post");
        assert_eq!(post.author().full_name(), "Jane Doe");

        post.apply_update(PostUpdate::default());
        assert_eq!(post.title(), "Updated");
        assert_eq!(post.content(), "First post");
    }

    #[test]
    fn test_apply_update_replaces_author() {
        let mut post = fixed_post();
        post.apply_update(PostUpdate {
            author: Some(Author {
                first_name: "John".to_string(),
                last_name: "Smith".to_string(),
            }),
            ..Default::default()
        });
        assert_eq!(post.author().full_name(), "John Smith");
        assert_eq!(post.title(), "Hello");
    }

    #[test]
    fn test_api_repr_flattens_author() {
        let repr = fixed_post().api_repr();
        assert_eq!(repr.id, "01ARZ3NDEKTSV4RRFFQ69G5FAV");
        assert_eq!(repr.author, "Jane Doe");
        assert_eq!(repr.title, "Hello");
    }

    #[test]
    fn test_api_repr_serialization() {
        let json = serde_json::to_string_pretty(&fixed_post().api_repr()).unwrap();
        expect![[r#"
            {
              "id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
              "title": "Hello",
              "content": "First post",
              "author": "Jane Doe",
              "created": "2024-05-01T12:00:00Z"
            }"#]]
        .assert_eq(&json);
    }

    #[test]
    fn test_blog_post_serde_round_trip() {
        let post = fixed_post();
        let json = serde_json::to_string(&post).unwrap();
        let parsed: BlogPost = serde_json::from_str(&json).unwrap();
        assert_eq!(post, parsed);
    }

    #[test]
    fn test_author_uses_camel_case_field_names() {
        let author = Author {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        };
        let json = serde_json::to_string(&author).unwrap();
        assert_eq!(json, r#"{"firstName":"Jane","lastName":"Doe"}"#);
    }
}

use serde::Deserialize;

use crate::post::{Author, NewPost, PostUpdate};

fn missing_field(field: &str) -> String {
    format!("Missing `{field}` in request body")
}

/// Author fields as they appear in request bodies. Both parts are
/// required once an author object is present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl AuthorPayload {
    fn validate(self) -> Result<Author, String> {
        let first_name = self
            .first_name
            .ok_or_else(|| missing_field("author.firstName"))?;
        let last_name = self
            .last_name
            .ok_or_else(|| missing_field("author.lastName"))?;
        Ok(Author {
            first_name,
            last_name,
        })
    }
}

/// Body of a create request. Every field is optional at the schema
/// level; validation reports the first missing one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorPayload>,
}

impl CreatePostRequest {
    /// Checks `title`, `content` and `author` in that order and returns
    /// the validated input, or the message for the first missing field.
    pub fn validate(self) -> Result<NewPost, String> {
        let title = self.title.ok_or_else(|| missing_field("title"))?;
        let content = self.content.ok_or_else(|| missing_field("content"))?;
        let author = self
            .author
            .ok_or_else(|| missing_field("author"))?
            .validate()?;
        Ok(NewPost {
            title,
            content,
            author,
        })
    }
}

/// Body of an update request. The id must be present and equal to the
/// id in the request path; all other fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorPayload>,
}

impl UpdatePostRequest {
    /// Checks the id pair and any author object, returning the update
    /// to apply. The id comparison works on the raw strings, before
    /// anything is looked up.
    pub fn validate(self, path_id: &str) -> Result<PostUpdate, String> {
        match self.id.as_deref() {
            Some(body_id) if body_id == path_id => {}
            body_id => {
                return Err(format!(
                    "Request path id ({}) and request body id ({}) must match",
                    path_id,
                    body_id.unwrap_or("missing")
                ));
            }
        }
        let author = match self.author {
            Some(payload) => Some(payload.validate()?),
            None => None,
        };
        Ok(PostUpdate {
            title: self.title,
            content: self.content,
            author,
        })
    }
}

use std::collections::HashMap;

use gazette_base::GazetteResult;

use crate::post::{BlogPost, NewPost, PostId, PostUpdate};
use crate::store::traits::BlogStore;

/// Blog store backed by a plain in-memory map. Contents are lost when
/// the process exits.
///
/// # Examples
///
/// ```
/// use gazette_engine::post::{Author, NewPost};
/// use gazette_engine::store::{BlogStore, InMemoryStore};
///
/// let mut store = InMemoryStore::new();
/// let post = store
///     .insert(NewPost {
///         title: "Hello".to_string(),
///         content: "First post".to_string(),
///         author: Author {
///             first_name: "Jane".to_string(),
///             last_name: "Doe".to_string(),
///         },
///     })
///     .unwrap();
///
/// assert_eq!(store.get(post.id()).unwrap().unwrap().title(), "Hello");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    posts: HashMap<PostId, BlogPost>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlogStore for InMemoryStore {
    fn insert(&mut self, new_post: NewPost) -> GazetteResult<BlogPost> {
        let post = BlogPost::new(new_post);
        self.posts.insert(*post.id(), post.clone());
        Ok(post)
    }

    fn get(&self, id: &PostId) -> GazetteResult<Option<BlogPost>> {
        Ok(self.posts.get(id).cloned())
    }

    fn list(&self) -> GazetteResult<Vec<BlogPost>> {
        let mut posts: Vec<BlogPost> = self.posts.values().cloned().collect();
        posts.sort_by_key(|post| (post.created(), *post.id()));
        Ok(posts)
    }

    fn update(&mut self, id: &PostId, update: PostUpdate) -> GazetteResult<Option<BlogPost>> {
        match self.posts.get_mut(id) {
            Some(post) => {
                post.apply_update(update);
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    fn remove(&mut self, id: &PostId) -> GazetteResult<Option<BlogPost>> {
        Ok(self.posts.remove(id))
    }

    fn clear(&mut self) -> GazetteResult<()> {
        self.posts.clear();
        Ok(())
    }

    fn len(&self) -> GazetteResult<usize> {
        Ok(self.posts.len())
    }

    fn is_empty(&self) -> GazetteResult<bool> {
        Ok(self.posts.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::Author;
    use crate::store::traits::StoreHandle;

    fn sample_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: format!("Content for {title}"),
            author: Author {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            },
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.is_empty().unwrap());
        assert_eq!(store.len().unwrap(), 0);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = InMemoryStore::new();
        let post = store.insert(sample_post("First")).unwrap();

        let loaded = store.get(post.id()).unwrap().unwrap();
        assert_eq!(loaded, post);
        assert_eq!(loaded.title(), "First");
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_get_unknown_id_returns_none() {
        let store = InMemoryStore::new();
        assert!(store.get(&PostId::generate()).unwrap().is_none());
    }

    #[test]
    fn test_list_returns_posts_in_creation_order() {
        let mut store = InMemoryStore::new();
        store.insert(sample_post("First")).unwrap();
        store.insert(sample_post("Second")).unwrap();
        store.insert(sample_post("Third")).unwrap();

        let posts = store.list().unwrap();
        let titles: Vec<&str> = posts.iter().map(|post| post.title()).collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = InMemoryStore::new();
        let post = store.insert(sample_post("First")).unwrap();

        let updated = store
            .update(
                post.id(),
                PostUpdate {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.title(), "Renamed");
        assert_eq!(updated.content(), "Content for First");
        assert_eq!(updated.created(), post.created());

        let loaded = store.get(post.id()).unwrap().unwrap();
        assert_eq!(loaded, updated);
    }

    #[test]
    fn test_update_unknown_id_returns_none() {
        let mut store = InMemoryStore::new();
        let result = store
            .update(&PostId::generate(), PostUpdate::default())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_remove_returns_post_and_shrinks_store() {
        let mut store = InMemoryStore::new();
        let post = store.insert(sample_post("First")).unwrap();

        let removed = store.remove(post.id()).unwrap().unwrap();
        assert_eq!(removed.title(), "First");
        assert!(store.is_empty().unwrap());
        assert!(store.get(post.id()).unwrap().is_none());
    }

    #[test]
    fn test_remove_unknown_id_returns_none() {
        let mut store = InMemoryStore::new();
        assert!(store.remove(&PostId::generate()).unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut store = InMemoryStore::new();
        store.insert(sample_post("First")).unwrap();
        store.insert(sample_post("Second")).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_handle_clones_share_state() {
        let handle = StoreHandle::new(InMemoryStore::new());
        let clone = handle.clone();

        let post = handle.insert(sample_post("Shared")).unwrap();
        let loaded = clone.get(post.id()).unwrap().unwrap();
        assert_eq!(loaded.title(), "Shared");

        clone.remove(post.id()).unwrap();
        assert!(handle.is_empty().unwrap());
    }
}

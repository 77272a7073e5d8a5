use std::sync::Arc;

use gazette_base::GazetteResult;
use parking_lot::RwLock;

use crate::post::{BlogPost, NewPost, PostId, PostUpdate};

/// Trait for blog post storage backends.
///
/// Lookup style operations return `Ok(None)` for unknown ids so callers
/// decide how a missing post is reported; `Err` is reserved for real
/// failures such as a broken database file.
pub trait BlogStore: Send + Sync + 'static {
    /// Stores a new post, assigning its id and creation timestamp.
    /// Returns the stored post including the assigned fields.
    fn insert(&mut self, new_post: NewPost) -> GazetteResult<BlogPost>;

    /// Retrieves a post by id.
    fn get(&self, id: &PostId) -> GazetteResult<Option<BlogPost>>;

    /// Lists all posts in creation order.
    fn list(&self) -> GazetteResult<Vec<BlogPost>>;

    /// Applies a partial update to the post with the given id.
    /// Returns the updated post, or `None` if no such post exists.
    fn update(&mut self, id: &PostId, update: PostUpdate) -> GazetteResult<Option<BlogPost>>;

    /// Removes a post by id. Returns the removed post, or `None` if no
    /// such post exists.
    fn remove(&mut self, id: &PostId) -> GazetteResult<Option<BlogPost>>;

    /// Removes all posts.
    fn clear(&mut self) -> GazetteResult<()>;

    /// Number of stored posts.
    fn len(&self) -> GazetteResult<usize>;

    fn is_empty(&self) -> GazetteResult<bool>;
}

/// Handle to a blog store, enabling shared ownership across threads.
///
/// Wraps the store in `Arc<RwLock<..>>`; each operation takes the lock
/// for exactly its own duration, so concurrent requests serialize at
/// the store boundary.
#[derive(Clone)]
pub struct StoreHandle(Arc<RwLock<dyn BlogStore>>);

impl StoreHandle {
    /// Creates a new handle from a store implementation.
    pub fn new(store: impl BlogStore) -> Self {
        Self(Arc::new(RwLock::new(store)))
    }

    /// See [`BlogStore::insert`].
    pub fn insert(&self, new_post: NewPost) -> GazetteResult<BlogPost> {
        self.0.write().insert(new_post)
    }

    /// See [`BlogStore::get`].
    pub fn get(&self, id: &PostId) -> GazetteResult<Option<BlogPost>> {
        self.0.read().get(id)
    }

    /// See [`BlogStore::list`].
    pub fn list(&self) -> GazetteResult<Vec<BlogPost>> {
        self.0.read().list()
    }

    /// See [`BlogStore::update`].
    pub fn update(&self, id: &PostId, update: PostUpdate) -> GazetteResult<Option<BlogPost>> {
        self.0.write().update(id, update)
    }

    /// See [`BlogStore::remove`].
    pub fn remove(&self, id: &PostId) -> GazetteResult<Option<BlogPost>> {
        self.0.write().remove(id)
    }

    /// See [`BlogStore::clear`].
    pub fn clear(&self) -> GazetteResult<()> {
        self.0.write().clear()
    }

    /// See [`BlogStore::len`].
    pub fn len(&self) -> GazetteResult<usize> {
        self.0.read().len()
    }

    /// See [`BlogStore::is_empty`].
    pub fn is_empty(&self) -> GazetteResult<bool> {
        self.0.read().is_empty()
    }
}

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use gazette_base::error::ErrorKind;
use gazette_base::{GazetteError, GazetteResult, ResultExt};
use tracing::debug;

use crate::post::{BlogPost, NewPost, PostId, PostUpdate};
use crate::store::traits::BlogStore;

/// Blog store persisted as a single JSON document on disk.
///
/// The whole collection is loaded at open and rewritten after every
/// mutation. Writes go to a sibling temporary file that is renamed
/// into place, and a failed write leaves the in-memory state unchanged.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    posts: HashMap<PostId, BlogPost>,
}

impl JsonFileStore {
    /// Opens a store at the given path, loading any existing posts.
    /// A missing file is treated as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> GazetteResult<Self> {
        let path = path.into();
        let posts = match fs::read(&path) {
            Ok(bytes) => {
                let posts: Vec<BlogPost> = serde_json::from_slice(&bytes)
                    .map_err(|e| Box::new(GazetteError::new(ErrorKind::Json { source: e })))
                    .with_context(|| {
                        format!("Failed to load blog posts from {}", path.display())
                    })?;
                debug!(count = posts.len(), path = %path.display(), "loaded posts");
                posts.into_iter().map(|post| (*post.id(), post)).collect()
            }
            // First run, no file yet
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(Box::new(GazetteError::new(ErrorKind::FileError {
                    path,
                    source: e,
                })));
            }
        };
        Ok(Self { path, posts })
    }

    fn persist(&self) -> GazetteResult<()> {
        let mut posts: Vec<&BlogPost> = self.posts.values().collect();
        posts.sort_by_key(|post| (post.created(), *post.id()));
        let json = serde_json::to_string_pretty(&posts)
            .map_err(|e| Box::new(GazetteError::new(ErrorKind::Json { source: e })))?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json).map_err(|e| {
            Box::new(GazetteError::new(ErrorKind::FileError {
                path: tmp_path.clone(),
                source: e,
            }))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            Box::new(GazetteError::new(ErrorKind::FileError {
                path: self.path.clone(),
                source: e,
            }))
        })?;
        Ok(())
    }
}

impl BlogStore for JsonFileStore {
    fn insert(&mut self, new_post: NewPost) -> GazetteResult<BlogPost> {
        let post = BlogPost::new(new_post);
        let id = *post.id();
        self.posts.insert(id, post.clone());
        if let Err(e) = self.persist() {
            self.posts.remove(&id);
            return Err(e);
        }
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
        let Some(post) = self.posts.get_mut(id) else {
            return Ok(None);
        };
        let previous = post.clone();
        post.apply_update(update);
        let updated = post.clone();
        if let Err(e) = self.persist() {
            self.posts.insert(*id, previous);
            return Err(e);
        }
        Ok(Some(updated))
    }

    fn remove(&mut self, id: &PostId) -> GazetteResult<Option<BlogPost>> {
        let Some(removed) = self.posts.remove(id) else {
            return Ok(None);
        };
        if let Err(e) = self.persist() {
            self.posts.insert(*id, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    fn clear(&mut self) -> GazetteResult<()> {
        let previous = std::mem::take(&mut self.posts);
        if let Err(e) = self.persist() {
            self.posts = previous;
            return Err(e);
        }
        Ok(())
    }

    fn len(&self) -> GazetteResult<usize> {
        Ok(self.posts.len())
    }

    fn is_empty(&self) -> GazetteResult<bool> {
        Ok(self.posts.is_empty())
    }
}

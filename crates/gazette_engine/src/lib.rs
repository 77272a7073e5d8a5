pub mod api;
pub mod config;
pub mod post;
pub mod store;

pub use api::{ApiService, AuthorPayload, CreatePostRequest, UpdatePostRequest};
pub use config::Config;
pub use post::{Author, BlogPost, NewPost, PostId, PostRepr, PostUpdate};
pub use store::{BlogStore, InMemoryStore, JsonFileStore, StoreHandle, open_store};

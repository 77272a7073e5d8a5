mod requests;
mod service;

pub use requests::{AuthorPayload, CreatePostRequest, UpdatePostRequest};
pub use service::ApiService;

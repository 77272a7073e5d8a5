use gazette_base::GazetteResult;
use gazette_base::error::{ErrorKind, GazetteError};
use gazette_base::pal::http::{
    HttpMethod, HttpRequest, HttpResponse, HttpService, HttpStatusCode,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::api::requests::{CreatePostRequest, UpdatePostRequest};
use crate::post::{BlogPost, PostId, PostRepr};
use crate::store::StoreHandle;

/// Body sent for any store failure. Details stay in the log.
const INTERNAL_ERROR_BODY: &str = r#"{"message":"Internal server error"}"#;

/// Response wrapper for the post listing endpoint.
#[derive(Serialize)]
struct ListPostsResponse {
    blogposts: Vec<PostRepr>,
}

/// Body shape shared by all error responses.
#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

/// HTTP service exposing the blog post CRUD endpoints.
///
/// Routes:
/// - `GET /posts` lists all posts
/// - `GET /posts/{id}` fetches one post
/// - `POST /posts` creates a post
/// - `PUT /posts/{id}` partially updates a post
/// - `DELETE /posts/{id}` deletes a post
///
/// Anything else responds with 404.
#[derive(Clone)]
pub struct ApiService {
    store: StoreHandle,
}

impl ApiService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    fn serialize_json_response<T: Serialize>(data: &T) -> GazetteResult<HttpResponse> {
        serde_json::to_string(data)
            .map(HttpResponse::json)
            .map_err(|e| Box::new(GazetteError::new(ErrorKind::Json { source: e })))
    }

    fn json_message(
        status: HttpStatusCode,
        message: impl Into<String>,
    ) -> GazetteResult<HttpResponse> {
        let body = MessageResponse {
            message: message.into(),
        };
        Ok(Self::serialize_json_response(&body)?.with_status(status))
    }

    fn not_found_response() -> GazetteResult<HttpResponse> {
        Self::json_message(HttpStatusCode::NotFound, "Not Found")
    }

    fn bad_request_response(message: impl Into<String>) -> GazetteResult<HttpResponse> {
        Self::json_message(HttpStatusCode::BadRequest, message)
    }

    fn store_failure_response(error: &GazetteError, operation: &str) -> HttpResponse {
        error!(error = %error, operation, "store operation failed");
        HttpResponse::internal_error()
            .with_content_type("application/json")
            .with_body(INTERNAL_ERROR_BODY)
    }

    fn parse_json_body<T: DeserializeOwned>(request: &HttpRequest) -> Option<T> {
        match serde_json::from_slice(request.body().as_bytes()) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(error = %e, "request body is not valid json");
                None
            }
        }
    }

    fn handle_list_request(&self) -> GazetteResult<HttpResponse> {
        let posts = match self.store.list() {
            Ok(posts) => posts,
            Err(e) => return Ok(Self::store_failure_response(&e, "list")),
        };
        let response = ListPostsResponse {
            blogposts: posts.iter().map(BlogPost::api_repr).collect(),
        };
        Self::serialize_json_response(&response)
    }

    fn handle_get_request(&self, raw_id: &str) -> GazetteResult<HttpResponse> {
        let Some(id) = PostId::parse(raw_id) else {
            return Self::not_found_response();
        };
        match self.store.get(&id) {
            Ok(Some(post)) => Self::serialize_json_response(&post.api_repr()),
            Ok(None) => Self::not_found_response(),
            Err(e) => Ok(Self::store_failure_response(&e, "get")),
        }
    }

    fn handle_create_request(&self, request: &HttpRequest) -> GazetteResult<HttpResponse> {
        let Some(payload) = Self::parse_json_body::<CreatePostRequest>(request) else {
            return Self::bad_request_response("Request body is not valid JSON");
        };
        let new_post = match payload.validate() {
            Ok(new_post) => new_post,
            Err(message) => {
                debug!(%message, "rejected create request");
                return Self::bad_request_response(message);
            }
        };
        match self.store.insert(new_post) {
            Ok(post) => {
                info!(id = %post.id(), "created blog post");
                Ok(Self::serialize_json_response(&post.api_repr())?
                    .with_status(HttpStatusCode::Created))
            }
            Err(e) => Ok(Self::store_failure_response(&e, "insert")),
        }
    }

    fn handle_update_request(
        &self,
        raw_id: &str,
        request: &HttpRequest,
    ) -> GazetteResult<HttpResponse> {
        let Some(payload) = Self::parse_json_body::<UpdatePostRequest>(request) else {
            return Self::bad_request_response("Request body is not valid JSON");
        };
        let update = match payload.validate(raw_id) {
            Ok(update) => update,
            Err(message) => {
                debug!(%message, "rejected update request");
                return Self::bad_request_response(message);
            }
        };
        // An id that does not parse can match no record
        let Some(id) = PostId::parse(raw_id) else {
            return Self::not_found_response();
        };
        match self.store.update(&id, update) {
            Ok(Some(post)) => {
                info!(id = %post.id(), "updated blog post");
                Ok(HttpResponse::no_content())
            }
            Ok(None) => Self::not_found_response(),
            Err(e) => Ok(Self::store_failure_response(&e, "update")),
        }
    }

    fn handle_delete_request(&self, raw_id: &str) -> GazetteResult<HttpResponse> {
        // An unparseable id matches no record; there is nothing to delete
        let Some(id) = PostId::parse(raw_id) else {
            return Ok(HttpResponse::no_content());
        };
        match self.store.remove(&id) {
            Ok(removed) => {
                if let Some(post) = removed {
                    info!(id = %post.id(), "deleted blog post");
                }
                Ok(HttpResponse::no_content())
            }
            Err(e) => Ok(Self::store_failure_response(&e, "remove")),
        }
    }
}

impl std::fmt::Debug for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService").finish_non_exhaustive()
    }
}

impl HttpService for ApiService {
    fn handle_request(&self, request: HttpRequest) -> GazetteResult<HttpResponse> {
        let full_path = request.path();
        let path = full_path.split('?').next().unwrap_or(full_path);
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        match (request.method(), segments.as_slice()) {
            (HttpMethod::Get, ["posts"]) => self.handle_list_request(),
            (HttpMethod::Get, ["posts", id]) => self.handle_get_request(id),
            (HttpMethod::Post, ["posts"]) => self.handle_create_request(&request),
            (HttpMethod::Put, ["posts", id]) => self.handle_update_request(id, &request),
            (HttpMethod::Delete, ["posts", id]) => self.handle_delete_request(id),
            _ => {
                debug!(method = %request.method(), path, "no route matched");
                Self::not_found_response()
            }
        }
    }
}

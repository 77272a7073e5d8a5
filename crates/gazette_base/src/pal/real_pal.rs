use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::error::GazetteResult;
use crate::pal::http::{
    HttpHeaders, HttpMethod, HttpRequest, HttpResponse, HttpServerConfig, HttpServerHandle,
    HttpService, HttpStatusCode,
};
use crate::pal::traits::Pal;
use crate::tracing::{debug, error, info, instrument};

/// Interval at which the accept loop checks the shutdown flag.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// PAL implementation backed by the real network.
///
/// Servers run on background threads; each accepted request is handled
/// on its own thread.
#[derive(Debug, Default)]
pub struct RealPal;

impl RealPal {
    pub fn new() -> Self {
        Self
    }
}

impl Pal for RealPal {
    #[instrument(skip(self, service))]
    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> GazetteResult<HttpServerHandle> {
        let address = config.address();
        let server = tiny_http::Server::http(address.as_str())
            .map_err(|e| crate::err!("Failed to bind HTTP server to {}: {}", address, e))?;
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .or(config.port)
            .unwrap_or(0);
        let handle = HttpServerHandle::new(port);
        let shutdown = Arc::clone(handle.shutdown_flag());
        let service: Arc<dyn HttpService> = Arc::from(service);
        info!(port, server_name = %config.server_name, "http server listening");
        thread::spawn(move || accept_loop(server, service, shutdown));
        Ok(handle)
    }
}

fn accept_loop(
    server: tiny_http::Server,
    service: Arc<dyn HttpService>,
    shutdown: Arc<AtomicBool>,
) {
    while !shutdown.load(Ordering::SeqCst) {
        // Bounded wait so the shutdown flag is rechecked between requests
        match server.recv_timeout(ACCEPT_POLL_INTERVAL) {
            Ok(Some(request)) => {
                let service = Arc::clone(&service);
                thread::spawn(move || handle_connection(service, request));
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "http accept failed");
                break;
            }
        }
    }
    debug!("http server loop stopped");
}

fn handle_connection(service: Arc<dyn HttpService>, mut request: tiny_http::Request) {
    let method = request.method().to_string();
    let url = request.url().to_string();
    debug!(%method, %url, "incoming request");

    let Some(http_method) = HttpMethod::parse(&method) else {
        respond(request, HttpResponse::new(HttpStatusCode::MethodNotAllowed));
        return;
    };

    let mut headers = HttpHeaders::new();
    for header in request.headers() {
        headers.insert(header.field.to_string(), header.value.to_string());
    }

    let mut body = Vec::new();
    if let Err(e) = request.as_reader().read_to_end(&mut body) {
        debug!(error = %e, "failed to read request body");
        respond(request, HttpResponse::bad_request());
        return;
    }

    let mut http_request = HttpRequest::new(http_method, url).with_body(body);
    *http_request.headers_mut() = headers;

    let response = match service.handle_request(http_request) {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "request handler failed");
            HttpResponse::internal_error()
                .with_content_type("application/json")
                .with_body(r#"{"message":"Internal server error"}"#)
        }
    };
    respond(request, response);
}

fn respond(request: tiny_http::Request, response: HttpResponse) {
    let status = response.status().as_u16();
    let mut headers = Vec::new();
    for (name, value) in response.headers().all() {
        match tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => headers.push(header),
            Err(()) => debug!(name = %name, "skipping malformed response header"),
        }
    }
    let mut raw_response =
        tiny_http::Response::from_data(response.into_body().into_bytes()).with_status_code(status);
    for header in headers {
        raw_response.add_header(header);
    }
    if let Err(e) = request.respond(raw_response) {
        debug!(error = %e, "failed to send response");
    }
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::GazetteResult;
use crate::pal::http::{
    HttpRequest, HttpResponse, HttpServerConfig, HttpServerHandle, HttpService,
};
use crate::pal::traits::Pal;

#[derive(Debug)]
struct HttpServerInfo {
    service: Box<dyn HttpService>,
    _config: HttpServerConfig,
}

/// In-memory PAL implementation for testing.
///
/// HTTP servers are registered in a table instead of binding sockets.
/// Requests are driven through [`MockPal::simulate_request`]. Servers
/// without a configured port get sequential ports starting at 10000.
///
/// # Examples
///
/// ```
/// use gazette_base::pal::http::{HttpMethod, HttpRequest, HttpResponse, HttpServerConfig, HttpService};
/// use gazette_base::{GazetteResult, MockPal, Pal};
///
/// #[derive(Debug)]
/// struct HelloService;
///
/// impl HttpService for HelloService {
///     fn handle_request(&self, _request: HttpRequest) -> GazetteResult<HttpResponse> {
///         Ok(HttpResponse::ok().with_body("hello"))
///     }
/// }
///
/// let pal = MockPal::new();
/// let handle = pal
///     .start_http_server(Box::new(HelloService), HttpServerConfig::new("127.0.0.1"))
///     .unwrap();
/// let response = pal
///     .simulate_request(handle.port(), HttpRequest::new(HttpMethod::Get, "/"))
///     .unwrap();
/// assert_eq!(response.body().as_string(), "hello");
/// ```
#[derive(Debug, Clone)]
pub struct MockPal {
    http_servers: Arc<Mutex<HashMap<u16, HttpServerInfo>>>,
    next_port: Arc<AtomicU16>,
}

impl MockPal {
    pub fn new() -> Self {
        Self {
            http_servers: Arc::new(Mutex::new(HashMap::new())),
            next_port: Arc::new(AtomicU16::new(10000)),
        }
    }

    /// Dispatches a request to the service registered on `port`.
    pub fn simulate_request(&self, port: u16, request: HttpRequest) -> GazetteResult<HttpResponse> {
        let servers = self.http_servers.lock().unwrap();
        let info = servers
            .get(&port)
            .ok_or_else(|| crate::err!("No HTTP server registered on port {}", port))?;
        info.service.handle_request(request)
    }

    /// Number of servers currently registered.
    pub fn http_server_count(&self) -> usize {
        self.http_servers.lock().unwrap().len()
    }
}

impl Default for MockPal {
    fn default() -> Self {
        Self::new()
    }
}

impl Pal for MockPal {
    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> GazetteResult<HttpServerHandle> {
        let port = config
            .port
            .unwrap_or_else(|| self.next_port.fetch_add(1, Ordering::SeqCst));
        self.http_servers.lock().unwrap().insert(
            port,
            HttpServerInfo {
                service,
                _config: config,
            },
        );
        Ok(HttpServerHandle::new(port))
    }
}

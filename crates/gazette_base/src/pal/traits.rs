use std::sync::Arc;

use crate::error::GazetteResult;
use crate::pal::http::{HttpServerConfig, HttpServerHandle, HttpService};

/// Platform abstraction layer trait providing the HTTP transport.
///
/// Two implementations are provided:
/// - [`RealPal`](crate::RealPal): serves requests over real sockets
/// - [`MockPal`](crate::MockPal): in-memory implementation for testing
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Starts an HTTP server dispatching requests to the given service.
    ///
    /// The server starts listening immediately. It stops accepting
    /// connections when the returned handle is shut down or dropped.
    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> GazetteResult<HttpServerHandle>;
}

/// Handle to a PAL implementation, enabling shared ownership.
///
/// Wraps `Arc<dyn Pal>`, so it can be cloned and passed around freely.
///
/// # Examples
///
/// ```no_run
/// use gazette_base::{PalHandle, RealPal};
///
/// let pal = PalHandle::new(RealPal::new());
/// let pal_clone = pal.clone();
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Creates a new handle from a PAL implementation.
    pub fn new(pal: impl Pal) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pal::MockPal;
    use crate::pal::http::{HttpRequest, HttpResponse};

    #[derive(Debug)]
    struct EchoService;

    impl HttpService for EchoService {
        fn handle_request(&self, request: HttpRequest) -> GazetteResult<HttpResponse> {
            Ok(HttpResponse::ok().with_body(request.path().to_string()))
        }
    }

    #[test]
    fn test_handle_starts_server_through_deref() {
        let pal = PalHandle::new(MockPal::new());
        let handle = pal
            .start_http_server(
                Box::new(EchoService),
                HttpServerConfig::new("127.0.0.1").with_port(9000),
            )
            .unwrap();
        assert_eq!(handle.port(), 9000);
    }

    #[test]
    fn test_handle_clone_shares_pal() {
        let pal = PalHandle::new(MockPal::new());
        let clone = pal.clone();
        let handle = clone
            .start_http_server(Box::new(EchoService), HttpServerConfig::new("127.0.0.1"))
            .unwrap();
        assert!(handle.port() >= 10000);
    }
}

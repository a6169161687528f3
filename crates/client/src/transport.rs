use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use protocol::ApiError;

/// Boxed future without a `Send` bound; everything here runs on one thread.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Raw HTTP answer before any JSON interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase, may be empty.
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can perform an HTTP GET.
///
/// Implementations only report transport-level failures as `Err`; any
/// response, whatever its status, comes back as `Ok`.
pub trait Transport {
    fn get(&self, url: String) -> LocalBoxFuture<'_, Result<HttpResponse, ApiError>>;
}

impl<T: Transport + ?Sized> Transport for Rc<T> {
    fn get(&self, url: String) -> LocalBoxFuture<'_, Result<HttpResponse, ApiError>> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: String) -> LocalBoxFuture<'_, Result<HttpResponse, ApiError>> {
        (**self).get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::HttpResponse;

    #[test]
    fn success_range_is_2xx() {
        assert!(HttpResponse::new(200, "OK", "").is_success());
        assert!(HttpResponse::new(204, "", "").is_success());
        assert!(!HttpResponse::new(199, "", "").is_success());
        assert!(!HttpResponse::new(301, "", "").is_success());
        assert!(!HttpResponse::new(404, "Not Found", "").is_success());
    }
}

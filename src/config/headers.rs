use axum::http::{header, HeaderName, HeaderValue, Request, Response};
use std::{
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};

use super::AppEnvironment;

/// Security header values
const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const XSS_BLOCK: &str = "1; mode=block";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_API_VALUE: &str = "default-src 'none'; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";
const PERMISSIONS_POLICY_VALUE: &str = "geolocation=(), microphone=(), camera=()";

/// Cache header values
const NO_CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";
const NO_CACHE_PRAGMA: &str = "no-cache";
const EXPIRES_NOW: &str = "0";

/// Inserts a fixed set of headers into every response, replacing any value
/// the inner service already set.
#[derive(Clone)]
pub struct StaticHeadersLayer {
    headers: Arc<[(HeaderName, HeaderValue)]>,
}

impl StaticHeadersLayer {
    pub fn new(headers: Vec<(HeaderName, HeaderValue)>) -> Self {
        Self {
            headers: headers.into(),
        }
    }

    pub fn security(include_hsts: bool) -> Self {
        let mut headers = vec![
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static(NOSNIFF)),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static(DENY)),
            (header::X_XSS_PROTECTION, HeaderValue::from_static(XSS_BLOCK)),
            (
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static(CSP_API_VALUE),
            ),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static(REFERRER_POLICY_VALUE),
            ),
            (
                HeaderName::from_static("permissions-policy"),
                HeaderValue::from_static(PERMISSIONS_POLICY_VALUE),
            ),
        ];

        // Only add HSTS in production (HTTPS environments)
        if include_hsts {
            headers.push((
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(HSTS_VALUE),
            ));
        }

        Self::new(headers)
    }

    pub fn no_cache() -> Self {
        Self::new(vec![
            (header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE_CONTROL)),
            (header::PRAGMA, HeaderValue::from_static(NO_CACHE_PRAGMA)),
            (header::EXPIRES, HeaderValue::from_static(EXPIRES_NOW)),
        ])
    }
}

impl<S> Layer<S> for StaticHeadersLayer {
    type Service = StaticHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        StaticHeadersService {
            inner,
            headers: self.headers.clone(),
        }
    }
}

#[derive(Clone)]
pub struct StaticHeadersService<S> {
    inner: S,
    headers: Arc<[(HeaderName, HeaderValue)]>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for StaticHeadersService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = StaticHeadersFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        StaticHeadersFuture {
            future: self.inner.call(request),
            headers: self.headers.clone(),
        }
    }
}

#[pin_project::pin_project]
pub struct StaticHeadersFuture<F> {
    #[pin]
    future: F,
    headers: Arc<[(HeaderName, HeaderValue)]>,
}

impl<F, ResBody, E> std::future::Future for StaticHeadersFuture<F>
where
    F: std::future::Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: std::pin::Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.future.poll(cx) {
            Poll::Ready(Ok(mut response)) => {
                let headers = response.headers_mut();
                for (name, value) in this.headers.iter() {
                    headers.insert(name.clone(), value.clone());
                }
                Poll::Ready(Ok(response))
            }
            Poll::Ready(Err(e)) => Poll::Ready(Err(e)),
            Poll::Pending => Poll::Pending,
        }
    }
}

pub fn create_security_headers_layer(environment: AppEnvironment) -> StaticHeadersLayer {
    if environment.is_production() {
        tracing::info!("Security: HSTS header enabled (production mode)");
    } else {
        tracing::info!("Security: HSTS header disabled (development mode)");
    }

    StaticHeadersLayer::security(environment.is_production())
}

/// Response headers that stop browsers and proxies from caching listings.
pub fn create_no_cache_layer() -> StaticHeadersLayer {
    StaticHeadersLayer::no_cache()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_headers_layer_creation() {
        let layer = StaticHeadersLayer::security(false);
        assert_eq!(layer.headers.len(), 6);

        let layer_with_hsts = StaticHeadersLayer::security(true);
        assert_eq!(layer_with_hsts.headers.len(), 7);
    }

    #[test]
    fn test_development_has_no_hsts() {
        let layer = create_security_headers_layer(AppEnvironment::Development);
        assert!(!layer
            .headers
            .iter()
            .any(|(name, _)| name == header::STRICT_TRANSPORT_SECURITY));
    }

    #[test]
    fn test_no_cache_headers() {
        let layer = create_no_cache_layer();
        let names: Vec<HeaderName> = layer.headers.iter().map(|(name, _)| name.clone()).collect();
        assert_eq!(
            names,
            vec![header::CACHE_CONTROL, header::PRAGMA, header::EXPIRES]
        );
    }
}

//! Caller identity from a trusted request header.

use axum::http::{HeaderMap, HeaderName};
use docunest_access::{Caller, IdentityProvider};
use docunest_types::UserId;

/// Reads the user id from a header set by an authenticating reverse proxy.
///
/// The proxy must strip any client-supplied copy of the header. A missing,
/// non-UTF-8 or malformed value yields an anonymous caller.
#[derive(Debug, Clone)]
pub struct HeaderIdentity {
    header: HeaderName,
}

impl HeaderIdentity {
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }
}

impl IdentityProvider for HeaderIdentity {
    type Request = HeaderMap;

    fn current_caller(&self, headers: &HeaderMap) -> Caller {
        headers
            .get(&self.header)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| UserId::parse(v.trim()).ok())
            .into()
    }
}

//! Refresh-request classification.
//!
//! Only one outbound call shape is subject to the breaker policy: a
//! token request whose URI contains the token endpoint path segment
//! and whose query selects the refresh grant. Everything else passes
//! through the gate untouched.

use http::Uri;

use crate::config::RefreshConfig;

/// Does this request target the token endpoint with the refresh grant?
pub fn is_refresh_request(uri: &Uri, config: &RefreshConfig) -> bool {
    if !uri.path().contains(&config.token_endpoint_path) {
        return false;
    }
    let Some(query) = uri.query() else {
        return false;
    };
    url::form_urlencoded::parse(query.as_bytes())
        .any(|(key, value)| key == "grant_type" && value == config.grant_type.as_str())
}

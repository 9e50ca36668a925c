//! URL helpers for frontend-backend communication.

/// Base URL for API requests: the page's own protocol and host with the
/// backend `port`, e.g. "http://localhost:3000".
///
/// Empty when there is no window, so relative URLs are produced.
pub fn api_base(port: u16) -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, port)
}

/// `base + path + ?k=v&...` with every key and value percent-encoded.
pub fn build_url(base: &str, path: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return format!("{}{}", base, path);
    }
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}{}?{}", base, path, query)
}

/// Pathname of the current page, empty outside a browser.
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_pairs() {
        let pairs = vec![
            ("search".to_string(), "a&b c".to_string()),
            ("stage".to_string(), "[new,won]".to_string()),
        ];
        assert_eq!(
            build_url("http://h:3000", "/api/leads", &pairs),
            "http://h:3000/api/leads?search=a%26b%20c&stage=%5Bnew%2Cwon%5D"
        );
        assert_eq!(build_url("", "/api/users", &[]), "/api/users");
    }
}

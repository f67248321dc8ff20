//! RFC 6265 domain and path matching (section 5.1.3, 5.1.4).

/// Check if cookie domain matches request host.
pub fn domain_matches(cookie_domain: &str, request_host: &str, host_only: bool) -> bool {
    if host_only {
        // Host-only cookie: exact match required
        return cookie_domain.eq_ignore_ascii_case(request_host);
    }

    let cookie_domain = cookie_domain.trim_start_matches('.');

    if request_host.eq_ignore_ascii_case(cookie_domain) {
        return true;
    }

    // request_host must end with ".cookie_domain"
    let (host, domain) = (request_host.as_bytes(), cookie_domain.as_bytes());
    if host.len() > domain.len() {
        let split = host.len() - domain.len();
        return host[split..].eq_ignore_ascii_case(domain) && host[split - 1] == b'.';
    }

    false
}

/// Check if request path matches cookie path.
pub fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }

    if let Some(rest) = request_path.strip_prefix(cookie_path) {
        return cookie_path.ends_with('/') || rest.starts_with('/');
    }

    false
}

/// Default cookie path for a request path: the directory of the URL path.
pub fn default_path(request_path: &str) -> String {
    if !request_path.starts_with('/') {
        return "/".to_string();
    }
    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => request_path[..idx].to_string(),
    }
}

/// The host and every parent domain, e.g. `a.b.example.com`,
/// `b.example.com`, `example.com`.
pub fn candidate_domains(host: &str) -> Vec<String> {
    let mut domains = vec![host.to_string()];

    let parts: Vec<&str> = host.split('.').collect();
    for i in 1..parts.len().saturating_sub(1) {
        domains.push(parts[i..].join("."));
    }

    domains
}

//! HTTP span helpers.

/// Collapse numeric path segments so per-record paths share one metrics
/// route label, e.g. `/products/42/image` becomes `/products/{id}/image`.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

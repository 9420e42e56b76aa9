use reqwest::StatusCode;

/// Validate a response before it is handed to extraction.
///
/// Non-success statuses are rejected with a short reason. Success bodies
/// must look like HTML: either the content type says so, or (when the
/// server sent none) the body carries `<html` or `<!doctype`.
pub(super) fn validate_response(
    status: StatusCode,
    content_type: Option<&str>,
    body: &str,
) -> Result<(), String> {
    if !status.is_success() {
        let reason = match status {
            StatusCode::TOO_MANY_REQUESTS => "rate limited",
            StatusCode::FORBIDDEN => "forbidden",
            StatusCode::NOT_FOUND => "not found",
            StatusCode::UNAUTHORIZED => "unauthorized",
            StatusCode::BAD_REQUEST => "bad request",
            s if s.is_server_error() => "server error",
            _ => "unexpected status",
        };
        return Err(format!("status {} ({})", status.as_u16(), reason));
    }

    match content_type.map(str::to_ascii_lowercase) {
        Some(ct) if ct.contains("html") => Ok(()),
        Some(ct) => Err(format!("not html - content type {}", ct)),
        None => {
            let lower = body.to_ascii_lowercase();
            if lower.contains("<html") || lower.contains("<!doctype") {
                Ok(())
            } else {
                Err("not html - missing HTML markers".to_string())
            }
        }
    }
}

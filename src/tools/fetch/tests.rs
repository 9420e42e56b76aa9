#[cfg(test)]
mod tests {
    use crate::tools::fetch::headers::browser_headers;
    use crate::tools::fetch::utils::validate_response;
    use crate::tools::fetch::*;
    use reqwest::StatusCode;

    #[test]
    fn browser_headers_carry_user_agent() {
        let headers = browser_headers("shelfscrape-test/1.0");
        assert_eq!(
            headers.get("user-agent").and_then(|v| v.to_str().ok()),
            Some("shelfscrape-test/1.0")
        );
        assert!(headers.contains_key("accept"));
        assert!(headers.contains_key("sec-fetch-mode"));
    }

    #[test]
    fn invalid_user_agent_falls_back() {
        let headers = browser_headers("bad\nagent");
        assert_eq!(
            headers.get("user-agent").and_then(|v| v.to_str().ok()),
            Some(DEFAULT_USER_AGENT)
        );
    }

    #[test]
    fn validate_response_rejects_error_statuses() {
        let html = "<html><body>x</body></html>";
        let err = validate_response(StatusCode::NOT_FOUND, Some("text/html"), html).unwrap_err();
        assert!(err.contains("404"));
        assert!(err.contains("not found"));

        let err = validate_response(StatusCode::BAD_GATEWAY, Some("text/html"), html).unwrap_err();
        assert!(err.contains("server error"));

        let err =
            validate_response(StatusCode::TOO_MANY_REQUESTS, Some("text/html"), html).unwrap_err();
        assert!(err.contains("rate limited"));
    }

    #[test]
    fn validate_response_requires_html() {
        assert!(validate_response(StatusCode::OK, Some("text/html; charset=utf-8"), "").is_ok());
        assert!(
            validate_response(StatusCode::OK, Some("application/json"), "{\"a\":1}").is_err()
        );
        assert!(validate_response(StatusCode::OK, None, "<!DOCTYPE html><p>hi</p>").is_ok());
        assert!(validate_response(StatusCode::OK, None, "plain text").is_err());
    }

    #[test]
    fn fetch_config_defaults() {
        let config = FetchConfig::default();
        assert!(config.headless);
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);

        let config = config.with_timeout_ms(500).with_headless(false);
        assert_eq!(config.timeout().as_millis(), 500);
        assert!(!config.headless);
    }

    #[test]
    fn http_navigator_builds_headed_config() {
        let nav = HttpNavigator::new(FetchConfig::default().with_headless(false)).unwrap();
        assert_eq!(nav.name(), "http");
        assert!(!nav.config().headless);
    }
}

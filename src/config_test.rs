use super::*;

#[test]
fn default_base_is_relative_api_prefix() {
    assert_eq!(ApiConfig::default().base_url, "/api");
}

#[test]
fn new_trims_trailing_slashes() {
    assert_eq!(ApiConfig::new("http://localhost:8000/api/").base_url, "http://localhost:8000/api");
}

#[test]
fn new_falls_back_when_blank() {
    assert_eq!(ApiConfig::new("   ").base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn endpoint_joins_without_double_slash() {
    let config = ApiConfig::new("/api");
    assert_eq!(config.endpoint(CHAT_ENDPOINT), "/api/chat/");
    assert_eq!(config.endpoint(CURRENT_USER_ENDPOINT), "/api/auth/me/");
    assert_eq!(config.endpoint("auth/google/login/"), "/api/auth/google/login/");
}

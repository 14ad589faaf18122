use super::*;

#[test]
fn from_override_uses_default_when_missing() {
    assert_eq!(ApiConfig::from_override(None).base_url, "http://localhost:8000/api/v1");
}

#[test]
fn from_override_uses_default_when_blank() {
    assert_eq!(ApiConfig::from_override(Some("   ")).base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn from_override_prefers_environment_value() {
    assert_eq!(
        ApiConfig::from_override(Some("http://test-api.com")).base_url,
        "http://test-api.com"
    );
}

#[test]
fn from_override_trims_trailing_slashes() {
    assert_eq!(
        ApiConfig::from_override(Some("https://svc.example.com/api/v1//")).base_url,
        "https://svc.example.com/api/v1"
    );
}

#[test]
fn default_matches_missing_override() {
    assert_eq!(ApiConfig::default(), ApiConfig::from_override(None));
}

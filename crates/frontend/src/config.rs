/// How long the detail sheet slides in or out. Map gestures are paused for
/// this long around every open and close.
pub const SHEET_ANIMATION_MS: u32 = 300;

const FALLBACK_ORIGIN: &str = "http://localhost:8080";

/// Base URL of the REST API, without a trailing slash.
///
/// `PINMAP_API_URL` at build time wins; otherwise the page's own origin.
pub fn api_base_url() -> String {
    let origin = option_env!("PINMAP_API_URL")
        .map(str::to_string)
        .or_else(page_origin)
        .unwrap_or_else(|| FALLBACK_ORIGIN.to_string());
    api_root(&origin)
}

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

pub fn api_root(origin: &str) -> String {
    format!("{}/api", origin.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_root_appends_api() {
        assert_eq!(api_root("http://localhost:8080"), "http://localhost:8080/api");
    }

    #[test]
    fn test_api_root_strips_trailing_slash() {
        assert_eq!(api_root("https://map.example.org/"), "https://map.example.org/api");
    }
}

use std::env;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_TRANSCRIPT_WINDOW: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    /// Newest transcript entries shown by the renderer.
    pub transcript_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            transcript_window: DEFAULT_TRANSCRIPT_WINDOW,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url = lookup("CHAT_BACKEND_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let transcript_window = lookup("TRANSCRIPT_WINDOW")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_TRANSCRIPT_WINDOW);

        Self {
            backend_url,
            transcript_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("CHAT_BACKEND_URL", "http://10.0.0.5:9000"),
            ("TRANSCRIPT_WINDOW", "5"),
        ]));
        assert_eq!(config.backend_url, "http://10.0.0.5:9000");
        assert_eq!(config.transcript_window, 5);
    }

    #[test]
    fn ignores_unusable_window() {
        for bad in ["0", "-3", "lots"] {
            let config = Config::from_lookup(lookup(&[("TRANSCRIPT_WINDOW", bad)]));
            assert_eq!(config.transcript_window, DEFAULT_TRANSCRIPT_WINDOW);
        }
    }
}

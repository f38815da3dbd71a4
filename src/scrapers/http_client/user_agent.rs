//! The `fetch.user_agent` setting.
//!
//! Some partner sites return an empty page to unknown clients, so requests
//! identify as a desktop browser. `impersonate` rotates between real
//! browser strings per process.

use crate::config::DEFAULT_USER_AGENT;

const BROWSER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Safari/605.1.15",
];

/// Pick a browser string from `seed`.
fn browser_agent(seed: u32) -> &'static str {
    BROWSER_AGENTS[seed as usize % BROWSER_AGENTS.len()]
}

/// Turn the configured value into the header sent with every request.
pub fn resolve_user_agent(setting: &str) -> String {
    match setting.trim() {
        "" => DEFAULT_USER_AGENT.to_string(),
        s if s.eq_ignore_ascii_case("impersonate") => {
            browser_agent(chrono::Utc::now().timestamp_subsec_nanos()).to_string()
        }
        custom => custom.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_setting_uses_default() {
        assert_eq!(resolve_user_agent("  "), DEFAULT_USER_AGENT);
    }

    #[test]
    fn impersonate_uses_a_browser_string() {
        let agent = resolve_user_agent("Impersonate");
        assert!(BROWSER_AGENTS.contains(&agent.as_str()));
    }

    #[test]
    fn seed_wraps_around() {
        assert_eq!(browser_agent(0), browser_agent(BROWSER_AGENTS.len() as u32));
    }

    #[test]
    fn custom_setting_passes_through() {
        assert_eq!(resolve_user_agent("digest-bot/1.0"), "digest-bot/1.0");
    }
}

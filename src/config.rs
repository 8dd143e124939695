use std::env;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Runtime configuration read from the environment. The token stays optional
/// here; the startup path decides that a missing token is fatal.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: Option<String>,
    pub model: Option<String>,
    pub system_prompt: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            token: get_var("GITHUB_TOKEN").filter(|value| !value.trim().is_empty()),
            model: get_var("GHCHAT_MODEL").filter(|value| !value.trim().is_empty()),
            system_prompt: get_var("SYSTEM_PROMPT")
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }
}

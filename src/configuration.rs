use serde;

pub const DEFAULT_HF_SPACE: &str = "shuangyihu/career_conversation";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_app_name")]
    pub app_name: String,
    #[serde(default = "Settings::default_app_host")]
    pub app_host: String,
    #[serde(default = "Settings::default_app_port")]
    pub app_port: u16,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub cors: CorsSettings,
}

impl Settings {
    fn default_app_name() -> String {
        "Shuangyi Portfolio API".to_string()
    }

    fn default_app_host() -> String {
        "0.0.0.0".to_string()
    }

    const fn default_app_port() -> u16 {
        8000
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: Self::default_app_name(),
            app_host: Self::default_app_host(),
            app_port: Self::default_app_port(),
            chat: ChatSettings::default(),
            cors: CorsSettings::default(),
        }
    }
}

/// Remote Gradio app the chat endpoint proxies to
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ChatSettings {
    /// Hugging Face space id (`owner/name`) or a full base URL
    #[serde(default = "ChatSettings::default_space")]
    pub space: String,
    /// Named endpoint of the Gradio app
    #[serde(default = "ChatSettings::default_api_name")]
    pub api_name: String,
    /// Upper bound for a single HTTP round trip; unset means the transport default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Access token for private spaces (from env: HF_TOKEN)
    #[serde(skip)]
    pub hf_token: Option<String>,
}

impl ChatSettings {
    fn default_space() -> String {
        DEFAULT_HF_SPACE.to_string()
    }

    fn default_api_name() -> String {
        "/chat".to_string()
    }

    /// Environment always wins over the file for the space identity.
    pub fn apply_env(&mut self) {
        if let Some(space) = non_empty_env("HF_SPACE") {
            self.space = space;
        }
        self.hf_token = non_empty_env("HF_TOKEN");
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            space: Self::default_space(),
            api_name: Self::default_api_name(),
            timeout_secs: None,
            hf_token: None,
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CorsSettings {
    #[serde(default = "CorsSettings::default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl CorsSettings {
    fn default_allowed_origins() -> Vec<String> {
        [
            "http://localhost:3000",
            "https://github.com/ShuangyiHu",
            "https://meowow.me",
            "https://shuangyi-hu.vercel.app",
            "https://shuangyi-hu.up.railway.app",
            "https://personal-website-git-master-amandashuangyihu-9253s-projects.vercel.app/",
            "https://personal-website-ihkgkoecm-amandashuangyihu-9253s-projects.vercel.app/",
        ]
        .iter()
        .map(|origin| origin.to_string())
        .collect()
    }

    /// Origins as a browser sends them: no trailing slash, no blanks, no duplicates.
    pub fn normalized_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = Vec::with_capacity(self.allowed_origins.len());
        for origin in &self.allowed_origins {
            let origin = origin.trim().trim_end_matches('/');
            if origin.is_empty() || origins.iter().any(|known| known == origin) {
                continue;
            }
            origins.push(origin.to_string());
        }
        origins
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: Self::default_allowed_origins(),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        // configuration.yaml is optional, every field has a default
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;

    // Hosting platforms (Railway, Render, Fly.io) hand the port over in PORT
    if let Some(port) = non_empty_env("PORT") {
        config.app_port = port
            .parse()
            .map_err(|_| config::ConfigError::Message(format!("PORT is not a valid port: {}", port)))?;
    }

    config.chat.apply_env();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use std::sync::{Mutex, MutexGuard};

    lazy_static! {
        // Environment variables are process-wide; tests touching them run one at a time.
        static ref ENV_LOCK: Mutex<()> = Mutex::new(());
    }

    const ENV_KEYS: [&str; 3] = ["HF_SPACE", "HF_TOKEN", "PORT"];

    fn lock_env(vars: &[(&str, &str)]) -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        guard
    }

    fn clear_env(_guard: MutexGuard<'static, ()>) {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn hf_space_and_token_come_from_env() {
        let guard = lock_env(&[("HF_SPACE", "someone/other_space"), ("HF_TOKEN", "hf_abc")]);

        let mut chat = ChatSettings::default();
        chat.apply_env();
        clear_env(guard);

        assert_eq!(chat.space, "someone/other_space");
        assert_eq!(chat.hf_token.as_deref(), Some("hf_abc"));
    }

    #[test]
    fn blank_env_keeps_the_default_space() {
        let guard = lock_env(&[("HF_SPACE", "   "), ("HF_TOKEN", "")]);

        let mut chat = ChatSettings::default();
        chat.apply_env();
        clear_env(guard);

        assert_eq!(chat.space, DEFAULT_HF_SPACE);
        assert!(chat.hf_token.is_none());
    }

    #[test]
    fn get_configuration_applies_port_and_space_overrides() {
        let guard = lock_env(&[("HF_SPACE", "someone/other_space"), ("PORT", "9123")]);

        let settings = get_configuration();
        clear_env(guard);

        let settings = settings.unwrap();
        assert_eq!(settings.app_port, 9123);
        assert_eq!(settings.chat.space, "someone/other_space");
    }

    #[test]
    fn get_configuration_without_env_uses_defaults() {
        let guard = lock_env(&[]);

        let settings = get_configuration();
        clear_env(guard);

        let settings = settings.unwrap();
        assert_eq!(settings.app_port, 8000);
        assert_eq!(settings.chat.space, DEFAULT_HF_SPACE);
        assert!(settings.chat.hf_token.is_none());
    }

    #[test]
    fn invalid_port_is_a_configuration_error() {
        let guard = lock_env(&[("PORT", "eighty")]);

        let settings = get_configuration();
        clear_env(guard);

        let err = settings.unwrap_err();
        assert!(
            err.to_string().contains("PORT is not a valid port: eighty"),
            "{}",
            err
        );
    }

    #[test]
    fn trailing_slashes_and_duplicates_are_dropped() {
        let cors = CorsSettings {
            allowed_origins: vec![
                "https://meowow.me/".to_string(),
                "https://meowow.me".to_string(),
                "  ".to_string(),
                "http://localhost:3000".to_string(),
            ],
        };

        assert_eq!(
            cors.normalized_origins(),
            vec!["https://meowow.me".to_string(), "http://localhost:3000".to_string()]
        );
    }

    #[test]
    fn default_origins_cover_the_deployed_frontends() {
        let origins = CorsSettings::default().normalized_origins();

        assert_eq!(origins.len(), 7);
        assert!(origins.contains(&"http://localhost:3000".to_string()));
        assert!(origins
            .iter()
            .all(|origin| !origin.ends_with('/')));
    }

    #[test]
    fn defaults_point_at_the_career_space() {
        let settings = Settings::default();

        assert_eq!(settings.app_port, 8000);
        assert_eq!(settings.chat.space, DEFAULT_HF_SPACE);
        assert_eq!(settings.chat.api_name, "/chat");
        assert!(settings.chat.timeout_secs.is_none());
    }
}

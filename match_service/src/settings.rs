use std::str::FromStr;

use game_core::SessionConfig;

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Process settings read from the environment
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Serve RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub session: SessionConfig,
    pub log_format: LogFormat,
    /// Values that were present but unusable; defaults were kept
    pub warnings: Vec<String>,
}

impl Settings {
    pub const SEED_VAR: &'static str = "PONG_SEED";
    pub const TARGET_SCORE_VAR: &'static str = "PONG_TARGET_SCORE";
    pub const LOG_FORMAT_VAR: &'static str = "LOG_FORMAT";

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();

        if let Some(seed) = parse_var(&lookup, Self::SEED_VAR, &mut settings.warnings) {
            settings.seed = Some(seed);
        }

        match parse_var::<u32>(&lookup, Self::TARGET_SCORE_VAR, &mut settings.warnings) {
            Some(0) => settings
                .warnings
                .push(format!("{} must be at least 1", Self::TARGET_SCORE_VAR)),
            Some(score) => settings.session.target_score = score,
            None => {}
        }

        match lookup(Self::LOG_FORMAT_VAR).as_deref() {
            Some("json") => settings.log_format = LogFormat::Json,
            Some("compact") | None => {}
            Some(other) => settings.warnings.push(format!(
                "unknown {} {other:?}, using compact",
                Self::LOG_FORMAT_VAR
            )),
        }

        settings
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("ignoring {key}={raw:?}: not a valid number"));
            None
        }
    }
}

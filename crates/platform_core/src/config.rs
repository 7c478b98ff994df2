use std::fs;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub verification_delay_ms: u64,
    pub drift_interval_secs: u64,
    pub drift_tick_probability: f64,
    pub drift_positive_bias: f64,
    pub load_sample_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verification_delay_ms: 3_000,
            drift_interval_secs: 10,
            drift_tick_probability: 0.1,
            drift_positive_bias: 0.7,
            load_sample_data: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    verification_delay_ms: Option<u64>,
    drift_interval_secs: Option<u64>,
    drift_tick_probability: Option<f64>,
    drift_positive_bias: Option<f64>,
    load_sample_data: Option<bool>,
}

/// Defaults, overlaid by `platform.toml` when present, overlaid by
/// `APP__*` environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("platform.toml") {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            apply_file_settings(&mut settings, file_cfg);
        }
    }

    apply_env_overrides(&mut settings);
    settings
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.verification_delay_ms {
        settings.verification_delay_ms = v;
    }
    if let Some(v) = file_cfg.drift_interval_secs {
        settings.drift_interval_secs = v;
    }
    if let Some(v) = file_cfg.drift_tick_probability {
        settings.drift_tick_probability = v;
    }
    if let Some(v) = file_cfg.drift_positive_bias {
        settings.drift_positive_bias = v;
    }
    if let Some(v) = file_cfg.load_sample_data {
        settings.load_sample_data = v;
    }
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(v) = std::env::var("APP__VERIFICATION_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.verification_delay_ms = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__DRIFT_INTERVAL_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.drift_interval_secs = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__DRIFT_TICK_PROBABILITY") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.drift_tick_probability = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__DRIFT_POSITIVE_BIAS") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.drift_positive_bias = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__LOAD_SAMPLE_DATA") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.load_sample_data = parsed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_tunables() {
        let settings = Settings::default();
        assert_eq!(settings.verification_delay_ms, 3_000);
        assert_eq!(settings.drift_interval_secs, 10);
        assert!(settings.load_sample_data);
    }

    #[test]
    fn env_vars_override_file_and_defaults() {
        let mut settings = Settings::default();
        std::env::set_var("APP__VERIFICATION_DELAY_MS", "25");
        std::env::set_var("APP__LOAD_SAMPLE_DATA", "false");

        apply_env_overrides(&mut settings);

        assert_eq!(settings.verification_delay_ms, 25);
        assert!(!settings.load_sample_data);

        std::env::remove_var("APP__VERIFICATION_DELAY_MS");
        std::env::remove_var("APP__LOAD_SAMPLE_DATA");
    }

    #[test]
    fn file_settings_only_replace_present_keys() {
        let mut settings = Settings::default();
        let file_cfg: FileSettings =
            toml::from_str("drift_interval_secs = 2").expect("parse toml");
        apply_file_settings(&mut settings, file_cfg);
        assert_eq!(settings.drift_interval_secs, 2);
        assert_eq!(settings.verification_delay_ms, 3_000);
    }
}

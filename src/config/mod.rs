use crate::core::timer::{MAX_SETTING_SECS, TimerSettings};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_stats_file")]
    pub stats_file: String,
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
    #[serde(default = "default_min_interval")]
    pub min_interval_secs: u64,
    #[serde(default = "default_max_interval")]
    pub max_interval_secs: u64,
    #[serde(default = "default_alert_sound")]
    pub alert_sound: String,
    /// External command used to play the alert (paplay, aplay, afplay...).
    /// Autodetected when unset.
    #[serde(default)]
    pub player: Option<String>,
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_true")]
    pub notifications: bool,
}

fn default_stats_file() -> String {
    Config::stats_file_default().to_string_lossy().to_string()
}
fn minutes_setting(name: &str, minutes: u64) -> AppResult<TimeDelta> {
    if minutes > MAX_SETTING_SECS / 60 {
        return Err(AppError::Config(format!(
            "{} ({}) cannot exceed {} minutes",
            name,
            minutes,
            MAX_SETTING_SECS / 60
        )));
    }
    i64::try_from(minutes)
        .ok()
        .and_then(TimeDelta::try_minutes)
        .ok_or_else(|| AppError::Config(format!("{} is out of range: {}", name, minutes)))
}

fn default_work_minutes() -> u64 {
    90
}
fn default_break_minutes() -> u64 {
    20
}
fn default_min_interval() -> u64 {
    3 * 60
}
fn default_max_interval() -> u64 {
    5 * 60
}
fn default_alert_sound() -> String {
    Config::config_dir()
        .join("alert.wav")
        .to_string_lossy()
        .to_string()
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats_file: default_stats_file(),
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            min_interval_secs: default_min_interval(),
            max_interval_secs: default_max_interval(),
            alert_sound: default_alert_sound(),
            player: None,
            sound: true,
            notifications: true,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rfocus")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rfocus")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rfocus.conf")
    }

    /// Return the default path of the JSON statistics file
    pub fn stats_file_default() -> PathBuf {
        Self::config_dir().join("rfocus_stats.json")
    }

    /// Diagnostic log written by the tracing subscriber
    pub fn log_file() -> PathBuf {
        Self::config_dir().join("rfocus.log")
    }

    /// Activity journal printed by `rfocus log --print`
    pub fn activity_file() -> PathBuf {
        Self::config_dir().join("activity.jsonl")
    }

    /// Fallback chime synthesized when no alert sound file exists
    pub fn chime_file() -> PathBuf {
        Self::config_dir().join("chime.wav")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        Ok(cfg)
    }

    pub fn stats_path(&self) -> PathBuf {
        expand_tilde(&self.stats_file)
    }

    pub fn alert_sound_path(&self) -> PathBuf {
        expand_tilde(&self.alert_sound)
    }

    /// Check timing values and build the timer settings from them.
    pub fn timer_settings(&self) -> AppResult<TimerSettings> {
        let settings = TimerSettings {
            work: minutes_setting("work_minutes", self.work_minutes)?,
            rest: minutes_setting("break_minutes", self.break_minutes)?,
            min_interval_secs: self.min_interval_secs,
            max_interval_secs: self.max_interval_secs,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Initialize configuration and statistics files
    pub fn init_all(custom_stats: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // Stats file: user provided or default
        let stats_path = match custom_stats {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::stats_file_default(),
        };

        let config = Config {
            stats_file: stats_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        // Create empty stats file if not exists
        if !stats_path.exists() {
            if let Some(parent) = stats_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&stats_path, "{}")?;
        }

        Ok(stats_path)
    }
}

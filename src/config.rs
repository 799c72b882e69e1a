use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::activity::NewActivity;
use crate::calculator::roi::{DEFAULT_AUTOMATION_COST, DEFAULT_EFFICIENCY_REDUCTION};
use crate::format::DEFAULT_CURRENCY_SYMBOL;
use crate::interval::Interval;
use crate::repository::DEFAULT_DATA_FILE;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// 입력 폼과 ROI 미리보기의 기본값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// 시간당 단가
    pub hourly_rate: f64,
    /// 1회 소요 시간 [h]
    pub duration_hours: f64,
    pub frequency: f64,
    pub interval: Interval,
    pub category: String,
    /// 미리보기 자동화 투자비
    pub automation_cost: f64,
    /// 미리보기 효율 개선율(%)
    pub efficiency_reduction: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        let form = NewActivity::default();
        Self {
            hourly_rate: form.hourly_rate,
            duration_hours: form.duration,
            frequency: form.frequency,
            interval: form.interval,
            category: form.category,
            automation_cost: DEFAULT_AUTOMATION_COST,
            efficiency_reduction: DEFAULT_EFFICIENCY_REDUCTION,
        }
    }
}

impl Defaults {
    /// 이름만 비어 있는 입력 폼 초기값.
    pub fn new_activity(&self) -> NewActivity {
        NewActivity {
            name: String::new(),
            frequency: self.frequency,
            interval: self.interval,
            duration: self.duration_hours,
            hourly_rate: self.hourly_rate,
            category: self.category.clone(),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/ko/en-us)
    pub language: String,
    /// 언어팩 디렉터리(없으면 내장 문자열)
    pub locale_dir: Option<PathBuf>,
    pub currency_symbol: String,
    /// 활동 저장 파일
    pub data_file: PathBuf,
    /// RUST_LOG이 없을 때 쓰는 로그 레벨
    pub log_level: String,
    pub defaults: Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            locale_dir: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: "warn".to_string(),
            defaults: Defaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        log::info!("created default config at {}", path.display());
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 지정한 파일에 저장한다.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        save_config(self, path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_default_file_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = load_or_default(Some(&path)).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        let again = load_or_default(Some(&path)).unwrap();
        assert_eq!(again, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "currency_symbol = \"€\"\n[defaults]\nhourly_rate = 60.0\n").unwrap();
        let cfg = load_or_default(Some(&path)).unwrap();
        assert_eq!(cfg.currency_symbol, "€");
        assert_eq!(cfg.defaults.hourly_rate, 60.0);
        assert_eq!(cfg.defaults.efficiency_reduction, 80.0);
        assert_eq!(cfg.data_file, PathBuf::from("activities.json"));
    }

    #[test]
    fn form_defaults() {
        let form = Defaults::default().new_activity();
        assert_eq!(form.interval, Interval::Day);
        assert_eq!(form.hourly_rate, 25.0);
        assert_eq!(form.category, "Administrative");
    }
}

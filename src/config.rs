use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 轮盘图片目录，同时以 /uploads 对外提供静态访问
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 是否对导出文本做阿拉伯字形重塑与双向重排 (需启用 rtl-shaping feature)
    pub rtl_shaping: bool,
    /// 按顺序尝试的 TTF 字体，全部不可用时退回内置 Helvetica
    pub font_paths: Vec<PathBuf>,
    /// 报表标题、表头等固定文字的语言
    #[serde(default)]
    pub language: ReportLanguage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLanguage {
    #[default]
    En,
    Ar,
}

impl std::str::FromStr for ReportLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(ReportLanguage::En),
            "ar" => Ok(ReportLanguage::Ar),
            other => Err(format!("unsupported report language: {other}")),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            rtl_shaping: true,
            font_paths: default_font_paths(),
            language: ReportLanguage::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
        }
    }
}

fn default_font_paths() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/noto/NotoNaskhArabic-Regular.ttf",
        "/usr/share/fonts/noto/NotoNaskhArabic-Regular.ttf",
        "/Library/Fonts/Arial Unicode.ttf",
        "C:/Windows/Fonts/arialuni.ttf",
        "C:/Windows/Fonts/ARIALUNI.TTF",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                // 有配置文件：先解析再用环境变量覆盖
                toml::from_str(&config_str)
                    .map_err(|e| format!("Failed to parse config file: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件：使用默认值，下方统一用环境变量覆盖
                Config::default()
            }
            Err(e) => {
                return Err(format!("Unable to read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// 环境变量覆盖（即便文件存在时也覆盖）
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("UPLOAD_DIR") {
            self.storage.upload_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("MAX_UPLOAD_BYTES")
            && let Ok(n) = v.parse()
        {
            self.storage.max_upload_bytes = n;
        }
        if let Ok(v) = env::var("REPORT_RTL_SHAPING")
            && let Some(b) = parse_bool(&v)
        {
            self.report.rtl_shaping = b;
        }
        if let Ok(v) = env::var("REPORT_FONT_PATHS") {
            self.report.font_paths = split_list(&v, ':').into_iter().map(PathBuf::from).collect();
        }
        if let Ok(v) = env::var("REPORT_LANGUAGE")
            && let Ok(lang) = v.parse()
        {
            self.report.language = lang;
        }
        if let Ok(v) = env::var("CORS_ALLOWED_ORIGINS") {
            self.cors.allowed_origins = split_list(&v, ',');
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: "sqlite://wheel_of_fortune.db?mode=rwc".to_string(),
                max_connections: 5,
            },
            storage: StorageConfig::default(),
            report: ReportConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "sqlite::memory:"
            max_connections = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.upload_dir, PathBuf::from("uploads"));
        assert!(config.report.rtl_shaping);
        assert_eq!(config.report.language, ReportLanguage::En);
        assert_eq!(config.cors.allowed_origins.len(), 2);
    }

    #[test]
    fn test_parse_report_section() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8000

            [database]
            url = "sqlite://wheel.db?mode=rwc"
            max_connections = 5

            [report]
            rtl_shaping = false
            font_paths = ["/opt/fonts/Amiri-Regular.ttf"]
            language = "ar"
            "#,
        )
        .unwrap();
        assert!(!config.report.rtl_shaping);
        assert_eq!(config.report.language, ReportLanguage::Ar);
        assert_eq!(
            config.report.font_paths,
            vec![PathBuf::from("/opt/fonts/Amiri-Regular.ttf")]
        );
    }

    #[test]
    fn test_split_list_and_parse_bool() {
        assert_eq!(
            split_list("http://a, ,http://b", ','),
            vec!["http://a".to_string(), "http://b".to_string()]
        );
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_parse_report_language() {
        assert_eq!(" AR ".parse::<ReportLanguage>(), Ok(ReportLanguage::Ar));
        assert_eq!("en".parse::<ReportLanguage>(), Ok(ReportLanguage::En));
        assert!("fr".parse::<ReportLanguage>().is_err());
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// 已知的设置项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    WheelTitle,
    TextColor,
    MaxDisplayNames,
    SoundMuted,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::WheelTitle => "wheel_title",
            SettingKey::TextColor => "text_color",
            SettingKey::MaxDisplayNames => "max_display_names",
            SettingKey::SoundMuted => "sound_muted",
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub const DEFAULT_TEXT_COLOR: &str = "#333333";
/// POST 未携带 color 字段时写入的值
pub const DEFAULT_POSTED_TEXT_COLOR: &str = "#ffffff";

fn default_posted_text_color() -> String {
    DEFAULT_POSTED_TEXT_COLOR.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetTitleRequest {
    #[serde(default)]
    #[schema(example = "Friday Raffle")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TitleResponse {
    pub title: String,
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetTextColorRequest {
    #[serde(default = "default_posted_text_color")]
    #[schema(example = "#2c3e50")]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TextColorResponse {
    pub color: String,
    pub exists: bool,
}

/// 数字或数字字符串，无法解析按 0 处理
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetMaxDisplayNamesRequest {
    #[serde(default)]
    #[schema(value_type = Object, example = 20)]
    pub max_names: Value,
}

/// 0 表示不限制
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MaxDisplayNamesResponse {
    pub max_names: u64,
    pub exists: bool,
}

/// 接受 bool、数字 (非 0 为真) 或 "true"/"1"/"yes"/"on"
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetSoundMutedRequest {
    #[serde(default)]
    #[schema(value_type = Object, example = true)]
    pub muted: Value,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SoundMutedResponse {
    pub muted: bool,
    pub exists: bool,
}

/// 写入设置后的回显
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TitleSavedResponse {
    pub message: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TextColorSavedResponse {
    pub message: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MaxDisplayNamesSavedResponse {
    pub message: String,
    pub max_names: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SoundMutedSavedResponse {
    pub message: String,
    pub muted: bool,
}

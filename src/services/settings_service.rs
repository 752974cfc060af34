use crate::entities::setting_entity as settings;
use crate::error::AppResult;
use crate::models::{DEFAULT_TEXT_COLOR, SettingKey};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// 显示偏好 (键值存储，值统一以字符串保存，由读取方解释)
#[derive(Clone)]
pub struct SettingsService {
    pool: DatabaseConnection,
}

impl SettingsService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: SettingKey) -> AppResult<Option<String>> {
        let row = settings::Entity::find()
            .filter(settings::Column::Key.eq(key.as_str()))
            .one(&self.pool)
            .await?;
        Ok(row.map(|m| m.value))
    }

    /// 写入 (存在则更新 value 与 updated_at)
    pub async fn set(&self, key: SettingKey, value: &str) -> AppResult<()> {
        let model = settings::ActiveModel {
            key: Set(key.as_str().to_string()),
            value: Set(value.to_string()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        settings::Entity::insert(model)
            .on_conflict(
                OnConflict::column(settings::Column::Key)
                    .update_columns([settings::Column::Value, settings::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.pool)
            .await?;

        log::info!("Setting updated: {key}");
        Ok(())
    }

    /// 删除，返回是否存在过
    pub async fn delete(&self, key: SettingKey) -> AppResult<bool> {
        let result = settings::Entity::delete_many()
            .filter(settings::Column::Key.eq(key.as_str()))
            .exec(&self.pool)
            .await?;
        Ok(result.rows_affected > 0)
    }

    // ---- wheel_title ----

    pub async fn get_title(&self) -> AppResult<(String, bool)> {
        Ok(match self.get(SettingKey::WheelTitle).await? {
            Some(title) => (title, true),
            None => (String::new(), false),
        })
    }

    /// 返回实际保存的标题 (已去除首尾空白)
    pub async fn set_title(&self, title: &str) -> AppResult<String> {
        let title = title.trim().to_string();
        self.set(SettingKey::WheelTitle, &title).await?;
        Ok(title)
    }

    pub async fn delete_title(&self) -> AppResult<bool> {
        self.delete(SettingKey::WheelTitle).await
    }

    // ---- text_color ----

    pub async fn get_text_color(&self) -> AppResult<(String, bool)> {
        Ok(match self.get(SettingKey::TextColor).await? {
            Some(color) => (color, true),
            None => (DEFAULT_TEXT_COLOR.to_string(), false),
        })
    }

    pub async fn set_text_color(&self, color: &str) -> AppResult<String> {
        let color = color.trim().to_string();
        self.set(SettingKey::TextColor, &color).await?;
        Ok(color)
    }

    // ---- max_display_names (0 = 不限制) ----

    pub async fn get_max_display_names(&self) -> AppResult<(u64, bool)> {
        Ok(match self.get(SettingKey::MaxDisplayNames).await? {
            Some(raw) => (parse_stored_count(&raw), true),
            None => (0, false),
        })
    }

    pub async fn set_max_display_names(&self, max_names: u64) -> AppResult<u64> {
        self.set(SettingKey::MaxDisplayNames, &max_names.to_string())
            .await?;
        Ok(max_names)
    }

    // ---- sound_muted ----

    pub async fn get_sound_muted(&self) -> AppResult<(bool, bool)> {
        Ok(match self.get(SettingKey::SoundMuted).await? {
            Some(raw) => (raw.trim().eq_ignore_ascii_case("true"), true),
            None => (false, false),
        })
    }

    pub async fn set_sound_muted(&self, muted: bool) -> AppResult<bool> {
        self.set(SettingKey::SoundMuted, if muted { "true" } else { "false" })
            .await?;
        Ok(muted)
    }
}

/// 仅接受纯数字，其他内容按 0 处理
fn parse_stored_count(raw: &str) -> u64 {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    raw.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[test]
    fn test_parse_stored_count() {
        assert_eq!(parse_stored_count("25"), 25);
        assert_eq!(parse_stored_count(" 8 "), 8);
        assert_eq!(parse_stored_count("-3"), 0);
        assert_eq!(parse_stored_count("12a"), 0);
        assert_eq!(parse_stored_count(""), 0);
    }

    #[tokio::test]
    async fn test_defaults_when_absent() {
        let service = SettingsService::new(test_pool().await);
        assert_eq!(service.get_title().await.unwrap(), (String::new(), false));
        assert_eq!(
            service.get_text_color().await.unwrap(),
            ("#333333".to_string(), false)
        );
        assert_eq!(service.get_max_display_names().await.unwrap(), (0, false));
        assert_eq!(service.get_sound_muted().await.unwrap(), (false, false));
    }

    #[tokio::test]
    async fn test_title_round_trip_and_delete() {
        let service = SettingsService::new(test_pool().await);

        let saved = service.set_title("  Friday Raffle ").await.unwrap();
        assert_eq!(saved, "Friday Raffle");
        assert_eq!(
            service.get_title().await.unwrap(),
            ("Friday Raffle".to_string(), true)
        );

        assert!(service.delete_title().await.unwrap());
        assert_eq!(service.get_title().await.unwrap(), (String::new(), false));
        assert!(!service.delete_title().await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let service = SettingsService::new(test_pool().await);
        service.set_text_color("#111111").await.unwrap();
        service.set_text_color(" #2c3e50 ").await.unwrap();
        assert_eq!(
            service.get_text_color().await.unwrap(),
            ("#2c3e50".to_string(), true)
        );
    }

    #[tokio::test]
    async fn test_max_display_names() {
        let service = SettingsService::new(test_pool().await);
        service.set_max_display_names(15).await.unwrap();
        assert_eq!(service.get_max_display_names().await.unwrap(), (15, true));

        // 外部写入的非法值
        service
            .set(SettingKey::MaxDisplayNames, "lots")
            .await
            .unwrap();
        assert_eq!(service.get_max_display_names().await.unwrap(), (0, true));
    }

    #[tokio::test]
    async fn test_sound_muted() {
        let service = SettingsService::new(test_pool().await);
        service.set_sound_muted(true).await.unwrap();
        assert_eq!(service.get(SettingKey::SoundMuted).await.unwrap().as_deref(), Some("true"));
        assert_eq!(service.get_sound_muted().await.unwrap(), (true, true));

        service.set(SettingKey::SoundMuted, "TRUE").await.unwrap();
        assert_eq!(service.get_sound_muted().await.unwrap(), (true, true));

        service.set_sound_muted(false).await.unwrap();
        assert_eq!(service.get_sound_muted().await.unwrap(), (false, true));
    }
}

//! 轮盘中心图片存储
//!
//! 固定文件名 `wheel_center.png`，新上传覆盖旧图。写入先落到同目录的临时文件再 rename，
//! 读取方不会看到写了一半的图片。

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};
use crate::models::WheelImageStatus;

pub const WHEEL_IMAGE_FILE: &str = "wheel_center.png";
/// 上传目录对外挂载的路径前缀
pub const UPLOADS_MOUNT: &str = "/uploads";

#[derive(Clone)]
pub struct UploadService {
    upload_dir: PathBuf,
    max_upload_bytes: usize,
}

impl UploadService {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            upload_dir: config.upload_dir.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn wheel_image_url() -> String {
        format!("{UPLOADS_MOUNT}/{WHEEL_IMAGE_FILE}")
    }

    fn wheel_image_path(&self) -> PathBuf {
        self.upload_dir.join(WHEEL_IMAGE_FILE)
    }

    /// 启动时创建上传目录
    pub async fn ensure_upload_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        Ok(())
    }

    /// 只校验客户端声明的类型，不检查文件内容
    pub fn validate_content_type(content_type: Option<&str>) -> AppResult<()> {
        match content_type {
            Some(ct) if ct.trim().to_ascii_lowercase().starts_with("image/") => Ok(()),
            Some(ct) => Err(AppError::InvalidUpload(format!(
                "File must be an image, got '{ct}'"
            ))),
            None => Err(AppError::InvalidUpload(
                "File must be an image, no content type given".into(),
            )),
        }
    }

    /// 保存轮盘图片，返回公开 URL
    pub async fn save_wheel_image(&self, data: &[u8]) -> AppResult<String> {
        if data.is_empty() {
            return Err(AppError::InvalidUpload("Uploaded file is empty".into()));
        }
        if data.len() > self.max_upload_bytes {
            return Err(AppError::InvalidUpload(format!(
                "File too large (max {} bytes)",
                self.max_upload_bytes
            )));
        }

        self.ensure_upload_dir().await?;

        let tmp_path = self
            .upload_dir
            .join(format!(".{WHEEL_IMAGE_FILE}.{}.tmp", Uuid::new_v4()));
        if let Err(e) = tokio::fs::write(&tmp_path, data).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, self.wheel_image_path()).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        log::info!("Wheel image saved ({} bytes)", data.len());
        Ok(Self::wheel_image_url())
    }

    pub async fn wheel_image_status(&self) -> AppResult<WheelImageStatus> {
        let exists = tokio::fs::try_exists(self.wheel_image_path()).await?;
        Ok(WheelImageStatus {
            url: exists.then(Self::wheel_image_url),
            exists,
        })
    }

    pub async fn delete_wheel_image(&self) -> AppResult<()> {
        match tokio::fs::remove_file(self.wheel_image_path()).await {
            Ok(()) => {
                log::info!("Wheel image deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound("No wheel image uploaded".into()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

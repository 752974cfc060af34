use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadImageResponse {
    #[schema(example = "/uploads/wheel_center.png")]
    pub url: String,
    pub message: String,
}

/// 轮盘中心图片状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WheelImageStatus {
    pub url: Option<String>,
    pub exists: bool,
}

pub mod participants;
pub mod settings;
pub mod upload;
pub mod wheel;
pub mod winners;

pub use participants::participants_config;
pub use settings::settings_config;
pub use upload::upload_config;
pub use wheel::wheel_config;
pub use winners::winners_config;

use crate::error::AppError;
use crate::models::MessageResponse;
use actix_web::{HttpResponse, web};

#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses(
        (status = 200, description = "欢迎信息", body = MessageResponse)
    )
)]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("Welcome to the Wheel of Fortune!"))
}

/// 所有 /api 路由
///
/// JSON 解析失败也走统一的错误结构 (VALIDATION_ERROR)
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .configure(participants_config)
    .configure(wheel_config)
    .configure(winners_config)
    .configure(settings_config)
    .configure(upload_config);
}

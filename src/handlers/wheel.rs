use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/spin",
    tag = "wheel",
    responses(
        (status = 200, description = "抽奖成功", body = SpinResponse),
        (status = 400, description = "奖池为空 (EMPTY_POOL)"),
        (status = 500, description = "数据库错误，本次抽奖已回滚")
    )
)]
/// 转动轮盘:
/// 1. 从当前奖池中均匀随机选出一人
/// 2. 将其移出奖池并写入中奖记录 (同一事务)
/// 3. 返回中奖者与剩余人数
pub async fn spin(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.draw().await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(SpinResponse::from(outcome)))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn wheel_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/spin", web::post().to(spin));
}

use crate::models::*;
use crate::services::{ReportService, WinnerService};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/winners",
    tag = "winners",
    responses(
        (status = 200, description = "中奖记录 (最近的在前)", body = WinnerListResponse)
    )
)]
pub async fn list_winners(service: web::Data<WinnerService>) -> Result<HttpResponse> {
    match service.list_winners().await {
        Ok(winners) => {
            let count = winners.len();
            Ok(HttpResponse::Ok().json(ApiResponse::success(WinnerListResponse { winners, count })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/winners",
    tag = "winners",
    responses(
        (status = 200, description = "中奖记录已清空", body = ClearResponse)
    )
)]
pub async fn clear_winners(service: web::Data<WinnerService>) -> Result<HttpResponse> {
    match service.clear_winners().await {
        Ok(removed) => Ok(HttpResponse::Ok().json(ApiResponse::success(ClearResponse {
            removed,
            message: "All winners cleared".to_string(),
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/winners/pdf",
    tag = "winners",
    responses(
        (status = 200, description = "中奖名单 PDF", content_type = "application/pdf"),
        (status = 500, description = "渲染失败 (RENDERING_FAILURE)")
    )
)]
/// 导出中奖名单 PDF (附件下载)
pub async fn export_winners_pdf(service: web::Data<ReportService>) -> Result<HttpResponse> {
    match service.export_pdf().await {
        Ok(report) => Ok(HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(report.filename)],
            })
            .body(report.bytes)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn winners_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/winners")
            .route("", web::get().to(list_winners))
            .route("", web::delete().to(clear_winners))
            .route("/pdf", web::get().to(export_winners_pdf)),
    );
}

use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::UploadService;
use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, ResponseError, Result, web};
use futures_util::TryStreamExt;

/// multipart 中承载图片的字段名
const FILE_FIELD: &str = "file";

/// 读取整个字段，超过上限立即拒绝
async fn read_field(field: &mut Field, limit: usize) -> AppResult<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| AppError::InvalidUpload(e.to_string()))?
    {
        if data.len() + chunk.len() > limit {
            return Err(AppError::InvalidUpload(format!(
                "File too large (max {limit} bytes)"
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn receive_wheel_image(
    service: &UploadService,
    mut payload: Multipart,
) -> AppResult<String> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(|m| m.to_string());
        UploadService::validate_content_type(content_type.as_deref())?;

        let data = read_field(&mut field, service.max_upload_bytes()).await?;
        return service.save_wheel_image(&data).await;
    }

    Err(AppError::InvalidUpload(format!(
        "Missing '{FILE_FIELD}' field"
    )))
}

#[utoipa::path(
    post,
    path = "/upload-wheel-image",
    tag = "upload",
    request_body(content = String, content_type = "multipart/form-data", description = "字段 file: 图片文件"),
    responses(
        (status = 200, description = "上传成功，覆盖旧图", body = UploadImageResponse),
        (status = 400, description = "不是图片或文件过大 (INVALID_UPLOAD)")
    )
)]
pub async fn upload_wheel_image(
    service: web::Data<UploadService>,
    payload: Multipart,
) -> Result<HttpResponse> {
    match receive_wheel_image(&service, payload).await {
        Ok(url) => Ok(HttpResponse::Ok().json(ApiResponse::success(UploadImageResponse {
            url,
            message: "Image uploaded successfully".to_string(),
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/wheel-image",
    tag = "upload",
    responses(
        (status = 200, description = "当前轮盘图片", body = WheelImageStatus)
    )
)]
pub async fn get_wheel_image(service: web::Data<UploadService>) -> Result<HttpResponse> {
    match service.wheel_image_status().await {
        Ok(status) => Ok(HttpResponse::Ok().json(ApiResponse::success(status))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/wheel-image",
    tag = "upload",
    responses(
        (status = 200, description = "删除成功", body = MessageResponse),
        (status = 404, description = "没有已上传的图片")
    )
)]
pub async fn delete_wheel_image(service: web::Data<UploadService>) -> Result<HttpResponse> {
    match service.delete_wheel_image().await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Image deleted successfully",
        )))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn upload_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload-wheel-image", web::post().to(upload_wheel_image))
        .route("/wheel-image", web::get().to(get_wheel_image))
        .route("/wheel-image", web::delete().to(delete_wheel_image));
}

use crate::models::*;
use crate::services::SettingsService;
use crate::utils::{coerce_max_names, coerce_muted};
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/settings/title",
    tag = "settings",
    responses(
        (status = 200, description = "轮盘标题，未设置时为空字符串", body = TitleResponse)
    )
)]
pub async fn get_title(service: web::Data<SettingsService>) -> Result<HttpResponse> {
    match service.get_title().await {
        Ok((title, exists)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(TitleResponse { title, exists })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/settings/title",
    tag = "settings",
    request_body = SetTitleRequest,
    responses(
        (status = 200, description = "保存成功", body = TitleSavedResponse)
    )
)]
pub async fn set_title(
    service: web::Data<SettingsService>,
    request: web::Json<SetTitleRequest>,
) -> Result<HttpResponse> {
    match service.set_title(&request.title).await {
        Ok(title) => Ok(HttpResponse::Ok().json(ApiResponse::success(TitleSavedResponse {
            message: "Title saved successfully".to_string(),
            title,
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/settings/title",
    tag = "settings",
    responses(
        (status = 200, description = "标题已删除 (不存在时同样成功)", body = MessageResponse)
    )
)]
pub async fn delete_title(service: web::Data<SettingsService>) -> Result<HttpResponse> {
    match service.delete_title().await {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "Title deleted successfully",
        )))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/settings/text-color",
    tag = "settings",
    responses(
        (status = 200, description = "文字颜色，默认 #333333", body = TextColorResponse)
    )
)]
pub async fn get_text_color(service: web::Data<SettingsService>) -> Result<HttpResponse> {
    match service.get_text_color().await {
        Ok((color, exists)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(TextColorResponse { color, exists })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/settings/text-color",
    tag = "settings",
    request_body = SetTextColorRequest,
    responses(
        (status = 200, description = "保存成功", body = TextColorSavedResponse)
    )
)]
pub async fn set_text_color(
    service: web::Data<SettingsService>,
    request: web::Json<SetTextColorRequest>,
) -> Result<HttpResponse> {
    match service.set_text_color(&request.color).await {
        Ok(color) => Ok(HttpResponse::Ok().json(ApiResponse::success(TextColorSavedResponse {
            message: "Text color saved successfully".to_string(),
            color,
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/settings/max-display-names",
    tag = "settings",
    responses(
        (status = 200, description = "轮盘上最多显示的名字数，0 为不限制", body = MaxDisplayNamesResponse)
    )
)]
pub async fn get_max_display_names(service: web::Data<SettingsService>) -> Result<HttpResponse> {
    match service.get_max_display_names().await {
        Ok((max_names, exists)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MaxDisplayNamesResponse { max_names, exists },
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/settings/max-display-names",
    tag = "settings",
    request_body = SetMaxDisplayNamesRequest,
    responses(
        (status = 200, description = "保存成功，非法输入按 0 保存", body = MaxDisplayNamesSavedResponse)
    )
)]
pub async fn set_max_display_names(
    service: web::Data<SettingsService>,
    request: web::Json<SetMaxDisplayNamesRequest>,
) -> Result<HttpResponse> {
    let max_names = coerce_max_names(&request.max_names);
    match service.set_max_display_names(max_names).await {
        Ok(max_names) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MaxDisplayNamesSavedResponse {
                message: "Max display names saved successfully".to_string(),
                max_names,
            },
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/settings/sound-muted",
    tag = "settings",
    responses(
        (status = 200, description = "是否静音，默认 false", body = SoundMutedResponse)
    )
)]
pub async fn get_sound_muted(service: web::Data<SettingsService>) -> Result<HttpResponse> {
    match service.get_sound_muted().await {
        Ok((muted, exists)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(SoundMutedResponse { muted, exists })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/settings/sound-muted",
    tag = "settings",
    request_body = SetSoundMutedRequest,
    responses(
        (status = 200, description = "保存成功", body = SoundMutedSavedResponse)
    )
)]
pub async fn set_sound_muted(
    service: web::Data<SettingsService>,
    request: web::Json<SetSoundMutedRequest>,
) -> Result<HttpResponse> {
    let muted = coerce_muted(&request.muted);
    match service.set_sound_muted(muted).await {
        Ok(muted) => Ok(HttpResponse::Ok().json(ApiResponse::success(SoundMutedSavedResponse {
            message: "Sound setting saved successfully".to_string(),
            muted,
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn settings_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("/title", web::get().to(get_title))
            .route("/title", web::post().to(set_title))
            .route("/title", web::delete().to(delete_title))
            .route("/text-color", web::get().to(get_text_color))
            .route("/text-color", web::post().to(set_text_color))
            .route("/max-display-names", web::get().to(get_max_display_names))
            .route("/max-display-names", web::post().to(set_max_display_names))
            .route("/sound-muted", web::get().to(get_sound_muted))
            .route("/sound-muted", web::post().to(set_sound_muted)),
    );
}

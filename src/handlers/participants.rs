use crate::models::*;
use crate::services::ParticipantService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/participants",
    tag = "participants",
    responses(
        (status = 200, description = "当前奖池 (最近加入的在前)", body = ParticipantListResponse)
    )
)]
pub async fn list_participants(service: web::Data<ParticipantService>) -> Result<HttpResponse> {
    match service.list_participants().await {
        Ok(participants) => {
            let count = participants.len() as u64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(ParticipantListResponse {
                participants,
                count,
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/participants",
    tag = "participants",
    request_body = AddParticipantRequest,
    responses(
        (status = 200, description = "添加成功", body = AddParticipantResponse),
        (status = 400, description = "名字为空或已存在 (DUPLICATE_NAME / VALIDATION_ERROR)")
    )
)]
pub async fn add_participant(
    service: web::Data<ParticipantService>,
    request: web::Json<AddParticipantRequest>,
) -> Result<HttpResponse> {
    match service.add_participant(&request.name).await {
        Ok(name) => Ok(HttpResponse::Ok().json(ApiResponse::success(AddParticipantResponse {
            message: format!("Participant {name} added successfully"),
            name,
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/participants/bulk",
    tag = "participants",
    request_body = BulkAddParticipantsRequest,
    responses(
        (status = 200, description = "批量添加结果，重复名字计入 skipped", body = BulkAddParticipantsResponse)
    )
)]
/// 批量添加: 逐个提交，重复的跳过，空白条目丢弃
pub async fn add_participants_bulk(
    service: web::Data<ParticipantService>,
    request: web::Json<BulkAddParticipantsRequest>,
) -> Result<HttpResponse> {
    match service.add_participants_bulk(&request.names).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            BulkAddParticipantsResponse::from(outcome),
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/participants/{name}",
    tag = "participants",
    params(
        ("name" = String, Path, description = "参与者名字 (精确匹配)")
    ),
    responses(
        (status = 200, description = "删除成功", body = MessageResponse),
        (status = 404, description = "参与者不存在")
    )
)]
pub async fn remove_participant(
    service: web::Data<ParticipantService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let name = path.into_inner();
    match service.remove_participant(&name).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            format!("Participant {name} removed successfully"),
        )))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/participants",
    tag = "participants",
    responses(
        (status = 200, description = "奖池已清空", body = ClearResponse)
    )
)]
pub async fn clear_participants(service: web::Data<ParticipantService>) -> Result<HttpResponse> {
    match service.clear_participants().await {
        Ok(removed) => Ok(HttpResponse::Ok().json(ApiResponse::success(ClearResponse {
            removed,
            message: "All participants cleared".to_string(),
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn participants_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/participants")
            .route("", web::get().to(list_participants))
            .route("", web::post().to(add_participant))
            .route("", web::delete().to(clear_participants))
            .route("/bulk", web::post().to(add_participants_bulk))
            .route("/{name}", web::delete().to(remove_participant)),
    );
}

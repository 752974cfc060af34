use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::participants::list_participants,
        handlers::participants::add_participant,
        handlers::participants::add_participants_bulk,
        handlers::participants::remove_participant,
        handlers::participants::clear_participants,
        handlers::wheel::spin,
        handlers::winners::list_winners,
        handlers::winners::clear_winners,
        handlers::winners::export_winners_pdf,
        handlers::settings::get_title,
        handlers::settings::set_title,
        handlers::settings::delete_title,
        handlers::settings::get_text_color,
        handlers::settings::set_text_color,
        handlers::settings::get_max_display_names,
        handlers::settings::set_max_display_names,
        handlers::settings::get_sound_muted,
        handlers::settings::set_sound_muted,
        handlers::upload::upload_wheel_image,
        handlers::upload::get_wheel_image,
        handlers::upload::delete_wheel_image,
    ),
    components(
        schemas(
            AddParticipantRequest,
            AddParticipantResponse,
            BulkAddParticipantsRequest,
            BulkAddParticipantsResponse,
            ParticipantListResponse,
            ClearResponse,
            SpinResponse,
            WinnerEntry,
            WinnerListResponse,
            SetTitleRequest,
            TitleResponse,
            TitleSavedResponse,
            SetTextColorRequest,
            TextColorResponse,
            TextColorSavedResponse,
            SetMaxDisplayNamesRequest,
            MaxDisplayNamesResponse,
            MaxDisplayNamesSavedResponse,
            SetSoundMutedRequest,
            SoundMutedResponse,
            SoundMutedSavedResponse,
            UploadImageResponse,
            WheelImageStatus,
            MessageResponse,
            ApiError,
        )
    ),
    tags(
        (name = "root", description = "Service greeting"),
        (name = "participants", description = "Participant pool API"),
        (name = "wheel", description = "Spin the wheel"),
        (name = "winners", description = "Winner log and PDF export"),
        (name = "settings", description = "Display settings API"),
        (name = "upload", description = "Wheel center image API"),
    ),
    info(
        title = "Wheel of Fortune API",
        version = "1.0.0",
        description = "Raffle wheel backend REST API documentation"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

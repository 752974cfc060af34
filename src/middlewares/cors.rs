use actix_cors::Cors;

/// 只放行配置中的前端地址
pub fn create_cors(allowed_origins: &[String]) -> Cors {
    let cors = allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allow_any_method()
        .allow_any_header()
        // 前端可能携带 Cookie
        .supports_credentials()
        .max_age(3600)
}

use actix_files::Files;
use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use wheel_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
    utils::select_shaper,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 上传目录需在静态文件服务挂载前存在
    let upload_service = UploadService::new(&config.storage);
    upload_service
        .ensure_upload_dir()
        .await
        .expect("Failed to create upload directory");

    let shaper = select_shaper(&config.report);
    log::info!("Report text shaper: {}", shaper.name());

    // 创建服务
    let participant_service = ParticipantService::new(pool.clone());
    let winner_service = WinnerService::new(pool.clone());
    let draw_service = DrawService::new(pool.clone());
    let settings_service = SettingsService::new(pool.clone());
    let report_service =
        ReportService::new(winner_service.clone(), config.report.clone(), shaper);

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let upload_dir = config.storage.upload_dir.clone();
    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&allowed_origins))
            .app_data(web::Data::new(participant_service.clone()))
            .app_data(web::Data::new(winner_service.clone()))
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(settings_service.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .app_data(web::Data::new(upload_service.clone()))
            .configure(swagger_config)
            .service(Files::new(UPLOADS_MOUNT, upload_dir.clone()))
            .route("/", web::get().to(handlers::root))
            .service(web::scope("/api").configure(handlers::api_config))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}

pub mod draw_service;
pub mod participant_service;
pub mod report_service;
pub mod settings_service;
pub mod upload_service;
pub mod winner_service;

pub use draw_service::*;
pub use participant_service::*;
pub use report_service::*;
pub use settings_service::*;
pub use upload_service::*;
pub use winner_service::*;

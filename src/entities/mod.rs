pub mod participants;
pub mod settings;
pub mod winners;

pub use participants as participant_entity;
pub use settings as setting_entity;
pub use winners as winner_entity;

pub mod common;
pub mod participant;
pub mod report;
pub mod setting;
pub mod upload;
pub mod winner;

pub use common::*;
pub use participant::*;
pub use report::*;
pub use setting::*;
pub use upload::*;
pub use winner::*;

// Domain data models

pub mod analysis;
pub mod cardio;
pub mod exercise;
pub mod invite;
pub mod notification;
pub mod program;
pub mod session;
pub mod suggestion;
pub mod user;

pub use analysis::*;
pub use cardio::*;
pub use exercise::*;
pub use invite::*;
pub use notification::*;
pub use program::*;
pub use session::*;
pub use suggestion::*;
pub use user::*;

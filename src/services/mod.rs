// Business logic services

pub mod analysis_service;
pub mod cardio_service;
pub mod exercise_service;
pub mod invite_service;
pub mod notification_service;
pub mod program_service;
pub mod session_service;
pub mod stats_service;
pub mod suggestion_scheduler;
pub mod suggestion_service;
pub mod user_service;

pub use analysis_service::AnalysisService;
pub use cardio_service::CardioService;
pub use exercise_service::ExerciseService;
pub use invite_service::{InviteError, InviteService};
pub use notification_service::NotificationService;
pub use program_service::{ProgramError, ProgramService};
pub use session_service::{SessionError, SessionService};
pub use stats_service::StatsService;
pub use suggestion_scheduler::SuggestionScheduler;
pub use suggestion_service::SuggestionService;
pub use user_service::UserService;

pub mod analytics;
pub mod assessments;
pub mod questions;

pub use analytics::configure_participant_routes;
pub use assessments::configure_assessment_routes;
pub use questions::configure_question_media_routes;

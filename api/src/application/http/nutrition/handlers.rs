pub mod create_nutrition_log;
pub mod create_nutrition_log_from_audio;

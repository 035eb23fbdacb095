pub mod alert_controller;
pub mod media_controller;
pub mod person_controller;
pub mod report_controller;
pub mod user_controller;
pub mod vehicle_controller;

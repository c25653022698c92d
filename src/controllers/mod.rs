pub mod fleet_controller;
pub mod session_controller;

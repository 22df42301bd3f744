pub mod compression_controller;
pub mod health_controller;

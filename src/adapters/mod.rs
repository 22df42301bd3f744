pub mod controllers;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;

pub mod session_controller;
pub mod session_extractor;
pub mod session_registry;
pub mod session_state;

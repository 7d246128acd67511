pub mod collection_controller;
pub mod collection_export;
pub mod collection_model;
pub mod collection_store;

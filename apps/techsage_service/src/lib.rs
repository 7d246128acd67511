pub mod app_config;
pub mod app_error;
pub mod app_extract;
pub mod app_module;
pub mod app_router;
pub mod collection;
pub mod generation;
pub mod health;
pub mod prompt;
pub mod session;
pub mod web;

#[cfg(test)]
mod test_support;

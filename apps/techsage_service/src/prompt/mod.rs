pub mod prompt_builder;
pub mod tone;

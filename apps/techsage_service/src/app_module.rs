use std::time::Duration;
use techsage_llm::LLMClient;

use crate::{
    generation::generation_service::GenerationService, session::session_registry::SessionRegistry,
};

#[derive(Clone)]
pub struct AppService {
    pub generation_service: GenerationService,
}

impl AppService {
    pub fn new(llm_client: LLMClient) -> Self {
        let generation_service = GenerationService::new(llm_client);

        Self { generation_service }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: AppService,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(llm_client: LLMClient, session_idle: Duration) -> Self {
        Self {
            service: AppService::new(llm_client),
            sessions: SessionRegistry::new(session_idle),
        }
    }
}

use crate::{
    domain::common::{GreenlensConfig, services::Service},
    infrastructure::{llm::GeminiLLMClient, pdf::LopdfDocumentWriter},
};

pub type GreenlensService = Service<GeminiLLMClient, LopdfDocumentWriter>;

pub fn create_service(config: GreenlensConfig) -> GreenlensService {
    let llm_client = GeminiLLMClient::new(config.llm.gemini_api_key, config.llm.gemini_model)
        .with_base_url(config.llm.gemini_base_url);

    Service::new(llm_client, LopdfDocumentWriter::new())
}

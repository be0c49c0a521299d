use std::sync::Arc;

use greenlens_core::application::GreenlensService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: GreenlensService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: GreenlensService) -> Self {
        Self { args, service }
    }
}

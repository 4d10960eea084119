use std::sync::Arc;

use crate::application::services::LinkService;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    pub fn new(link_service: LinkService) -> Self {
        Self {
            link_service: Arc::new(link_service),
        }
    }
}

use crate::infrastructure::higgsfield::client::HiggsfieldClient;

#[derive(Clone)]
pub struct AppState {
    pub higgsfield: HiggsfieldClient,
}

impl AppState {
    pub fn new(higgsfield: HiggsfieldClient) -> Self {
        Self { higgsfield }
    }
}

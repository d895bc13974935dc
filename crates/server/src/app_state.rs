use reqwest::Client;

use crate::config::Settings;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) settings: Settings,
    pub(crate) http: Client,
}

impl AppState {
    pub(crate) fn new(settings: Settings, http: Client) -> Self {
        Self { settings, http }
    }
}

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    BandsintownService, LastfmService, SetlistFmService, SpotifyService, TicketmasterService,
};

/// Shared application state. Each vendor service is `Some` only when its
/// credentials are configured; handlers answer with an empty result and
/// an explanatory note when a service is absent.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub spotify: Option<SpotifyService>,
    pub lastfm: Option<LastfmService>,
    pub ticketmaster: Option<TicketmasterService>,
    pub setlistfm: Option<SetlistFmService>,
    pub bandsintown: Option<BandsintownService>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let spotify = config
            .spotify_credentials()
            .map(|(id, secret)| SpotifyService::new(id.to_string(), secret.to_string()));
        let lastfm = config
            .lastfm_api_key
            .clone()
            .map(LastfmService::new);
        let ticketmaster = config
            .ticketmaster_api_key
            .clone()
            .map(TicketmasterService::new);
        let setlistfm = config
            .setlistfm_api_key
            .clone()
            .map(SetlistFmService::new);
        let bandsintown = config
            .bandsintown_app_id
            .clone()
            .map(BandsintownService::new);

        Self {
            db,
            config: Arc::new(config),
            spotify,
            lastfm,
            ticketmaster,
            setlistfm,
            bandsintown,
        }
    }
}

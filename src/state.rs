use std::sync::Arc;

use crate::{
    auth::{KeyMaterial, TokenService},
    config::Config,
    errors::AppError,
    store::{JobStore, MongoStore, ProfileStore, StoreHealth, UserDirectory},
};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub tokens: TokenService,
    pub users: Arc<dyn UserDirectory>,
    pub jobs: Arc<dyn JobStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl AppState {
    /// Loads the signing keys and connects to MongoDB. Either failure aborts
    /// startup before any request is served.
    pub async fn new(cfg: &Config) -> Result<Self, AppError> {
        let keys = KeyMaterial::load(&cfg.jwt_private_key_path, &cfg.jwt_public_key_path)?;
        let store = Arc::new(MongoStore::connect(cfg).await?);
        Self::with_store(cfg, keys, store)
    }

    pub fn with_store<S>(
        cfg: &Config,
        keys: KeyMaterial,
        store: Arc<S>,
    ) -> Result<Self, AppError>
    where
        S: UserDirectory + JobStore + ProfileStore + StoreHealth + 'static,
    {
        Ok(Self {
            cfg: Arc::new(cfg.clone()),
            tokens: TokenService::from_config(Arc::new(keys), cfg)?,
            users: store.clone(),
            jobs: store.clone(),
            profiles: store.clone(),
            health: store,
        })
    }
}

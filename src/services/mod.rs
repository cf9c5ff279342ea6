//! Business logic services

pub mod analytics;
pub mod catalog;
pub mod circulation;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub circulation: circulation::CirculationService,
    pub users: users::UsersService,
    pub analytics: analytics::AnalyticsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            circulation: circulation::CirculationService::new(repository.clone()),
            users: users::UsersService::new(repository.clone(), auth_config),
            analytics: analytics::AnalyticsService::new(repository),
        }
    }
}

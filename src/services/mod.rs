pub mod activity_service;
pub mod auth_service;
pub mod organization_service;
pub mod seed_service;

pub use activity_service::ActivityService;
pub use auth_service::{AuthService, IssuedKey};
pub use organization_service::OrganizationService;
pub use seed_service::SeedService;

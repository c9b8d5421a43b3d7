pub mod credentials;
pub use credentials::{Argon2Credentials, CredentialService};

pub mod csrf;

pub mod permission_service;
pub use permission_service::{PermissionError, PermissionService, SeaOrmPermissionService};

pub mod role_resolution;
pub use role_resolution::{RolePolicy, StoreTemplateDirectory, TemplateDirectory};

pub mod registration_service;
pub mod registration_service_impl;
pub use registration_service::{
    RegisteredUser, RegistrationError, RegistrationForm, RegistrationService,
};
pub use registration_service_impl::SeaOrmRegistrationService;

pub mod dashboard_service;
pub mod dashboard_service_impl;
pub use dashboard_service::{DashboardError, DashboardService, DashboardSummary};
pub use dashboard_service_impl::SeaOrmDashboardService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, UserInfo};
pub use auth_service_impl::SeaOrmAuthService;

pub mod user_admin_service;
pub mod user_admin_service_impl;
pub use user_admin_service::{CreateUserRequest, UserAdminError, UserAdminService};
pub use user_admin_service_impl::SeaOrmUserAdminService;

pub use super::domains::Entity as Domains;
pub use super::perm_items::Entity as PermItems;
pub use super::perm_templ::Entity as PermTempl;
pub use super::perm_templ_items::Entity as PermTemplItems;
pub use super::records::Entity as Records;
pub use super::users::Entity as Users;

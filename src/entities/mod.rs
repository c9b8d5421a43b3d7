pub mod prelude;

pub mod domains;
pub mod perm_items;
pub mod perm_templ;
pub mod perm_templ_items;
pub mod records;
pub mod users;

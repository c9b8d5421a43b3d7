mod init;
mod migrate;
mod templates;

pub use init::cmd_init;
pub use migrate::cmd_migrate;
pub use templates::{cmd_template_add, cmd_template_list};

mod commands;
mod handlers;
mod session;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_delete, handle_edit, handle_get, handle_init, handle_list, handle_new, handle_session,
};
pub use session::run_session;

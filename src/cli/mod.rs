mod commands;
mod handlers;

pub use commands::{Cli, Commands, ItemAction, ItemCommand, ReviewAction, ReviewCommand};
pub use handlers::{
    handle_add, handle_delete, handle_edit, handle_export, handle_import, handle_item_add,
    handle_list, handle_show,
};

use clap::Parser;
use goalplan::cli::{
    handle_add, handle_delete, handle_edit, handle_export, handle_import, handle_item_add,
    handle_list, handle_show, Cli, Commands, ItemAction, ReviewAction,
};
use goalplan::config::LOG_ENV;
use goalplan::editor::Edit;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // Logs go to stderr so --json output on stdout stays parseable.
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let store = cli.store;

    let result = match cli.command {
        Commands::List { json } => handle_list(store, json),
        Commands::Show { goal, json } => handle_show(store, goal, json),
        Commands::Add { json } => handle_add(store, json),
        Commands::Delete { goal, force } => handle_delete(store, goal, force),
        Commands::Export { goal, out, stdout } => handle_export(store, goal, out, stdout),
        Commands::Import { file, json } => handle_import(store, file, json),
        Commands::Item(item) => match item.action {
            ItemAction::Add {
                goal,
                list,
                text,
                json,
            } => handle_item_add(store, goal, list, text, json),
            ItemAction::Remove {
                goal,
                list,
                id,
                json,
            } => handle_edit(store, goal, Edit::RemoveItem(list, id), json),
            ItemAction::Set {
                goal,
                list,
                id,
                text,
                json,
            } => handle_edit(store, goal, Edit::UpdateItem(list, id, text), json),
            ItemAction::Toggle {
                goal,
                list,
                id,
                json,
            } => handle_edit(store, goal, Edit::ToggleItem(list, id), json),
        },
        Commands::Review(review) => match review.action {
            ReviewAction::Add { goal, list, json } => {
                handle_edit(store, goal, Edit::AddReview(list), json)
            }
            ReviewAction::Remove {
                goal,
                list,
                id,
                json,
            } => handle_edit(store, goal, Edit::RemoveReview(list, id), json),
            ReviewAction::Set {
                goal,
                list,
                id,
                field,
                value,
                json,
            } => handle_edit(store, goal, Edit::UpdateReview(list, id, field, value), json),
        },
        Commands::Dream { goal, text, json } => handle_edit(store, goal, Edit::SetDream(text), json),
        Commands::Time { goal, text, json } => {
            handle_edit(store, goal, Edit::SetPreferredTime(text), json)
        }
        Commands::Day { goal, day, json } => handle_edit(store, goal, Edit::ToggleDay(day), json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

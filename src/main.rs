use clap::Parser;
use notebox::cli::{
    handle_delete, handle_edit, handle_get, handle_init, handle_list, handle_new, handle_session,
    Cli, Commands,
};

fn main() {
    let cli = Cli::parse();
    notebox::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init => handle_init(),
        Commands::List { json } => handle_list(json),
        Commands::New {
            name,
            content,
            stdin,
            json,
        } => handle_new(name, content, stdin, json),
        Commands::Get { id, json } => handle_get(id, json),
        Commands::Edit {
            id,
            name,
            content,
            stdin,
            json,
        } => handle_edit(id, name, content, stdin, json),
        Commands::Delete { id, force } => handle_delete(id, force),
        Commands::Session => handle_session(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Interactive City Runners client.
//!
//! Loads the persisted application state, keeps it saved as it changes, and
//! can send locations over the WebSocket channel.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin cityrunners-client -- --store-path store.json
//! ```

use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use cityrunners_client::{
    AppContext,
    config::ClientConfig,
    ui::{self, Command, CommandError, Outcome},
};
use cityrunners_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ClientConfig::parse();
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    let (ctx, sync) = match AppContext::bootstrap(&config).await {
        Ok(started) => started,
        Err(e) => {
            tracing::error!("Failed to start client: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Client ready (store: {}, server: {})",
        config.store_path.display(),
        config.server_url
    );

    // rustyline blocks, so lines are read on a dedicated thread
    let (line_tx, mut lines) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || read_lines(line_tx));

    println!("{}", ui::command::HELP);
    while let Some(line) = lines.recv().await {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match ui::execute(&ctx, command).await {
            Ok(Outcome::Continue(message)) => println!("{}", message),
            Ok(Outcome::Quit) => break,
            Err(e) => println!("error: {}", e),
        }
    }

    ctx.channel().close();
    let revision = ctx.store().revision().await;
    sync.wait_for(revision).await;
    sync.shutdown().await;
    tracing::info!("Client stopped");
}

fn read_lines(lines: mpsc::UnboundedSender<String>) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            tracing::error!("Failed to start line editor: {}", e);
            return;
        }
    };

    loop {
        match editor.readline("city-runners> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if lines.send(line).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        }
    }
}

//! Terminal chat against a running Valyn Core server.
//!
//! `VALYN_URL` selects the server (default `http://localhost:3000`).
//! Type a message and press enter; an empty line is ignored. Ctrl-D exits.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use valyn_core::services::chat_session::{ChatSession, ProxyChatBackend, ASSISTANT_NAME};

const DEFAULT_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let base_url = std::env::var("VALYN_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let backend = ProxyChatBackend::new(&base_url);
    println!("Connected to {} (Ctrl-D to quit)", backend.endpoint());

    let mut session = ChatSession::new(backend);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        println!("{}: Typing...", ASSISTANT_NAME);
        match session.submit(&line).await {
            Some(reply) => println!("{}: {}", ASSISTANT_NAME, reply.content),
            None => continue,
        }
    }
}

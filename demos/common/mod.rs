//! Shared helpers for the demo binaries.
//!
//! Credential loading from the environment lives here, outside the library:
//! the client itself only accepts explicit configuration.

#![allow(dead_code)]

use std::env;
use std::io::{self, Write};

use dropboxlib::{authorize_url, DropboxClient, DropboxConfig, Result};

const USAGE: &str = "Set DROPBOX_API_KEY and DROPBOX_API_SECRET (and optionally \
DROPBOX_AUTH_TOKEN / DROPBOX_AUTH_TOKEN_SECRET to skip the interactive handshake).";

/// Build a client from DROPBOX_API_KEY / DROPBOX_API_SECRET.
pub fn client_from_env() -> DropboxClient {
    let key = env::var("DROPBOX_API_KEY").unwrap_or_else(|_| {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    });
    let secret = env::var("DROPBOX_API_SECRET").unwrap_or_else(|_| {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    });

    DropboxClient::new(DropboxConfig::new(key, secret)).expect("client construction")
}

/// Authenticate the client: reuse a stored token pair when the environment
/// provides one, otherwise run the interactive handshake.
pub async fn login(client: &DropboxClient) -> Result<()> {
    if let (Ok(token), Ok(secret)) = (
        env::var("DROPBOX_AUTH_TOKEN"),
        env::var("DROPBOX_AUTH_TOKEN_SECRET"),
    ) {
        client.set_access_token(token, secret)?;
        return Ok(());
    }

    client
        .authenticate(|token, secret| {
            println!("Request token: {}", token);
            println!("Request token secret: {}", secret);
            println!("Go to {} to authorize", authorize_url(token));
            print!("Hit enter to continue after authorization: ");
            io::stdout().flush().ok();
            let mut line = String::new();
            let _ = io::stdin().read_line(&mut line);
        })
        .await?;

    println!("Access token: {}", client.access_token().unwrap_or(""));
    println!(
        "Access token secret: {}",
        client.access_token_secret().unwrap_or("")
    );
    Ok(())
}

/// Default tracing setup for the demos (RUST_LOG-controlled).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

//! Run the interactive OAuth handshake and print the resulting access pair.

mod common;

use dropboxlib::Result;

#[tokio::main]
async fn main() -> Result<()> {
    common::init_tracing();

    let client = common::client_from_env();
    common::login(&client).await?;

    println!("Authenticated. Export DROPBOX_AUTH_TOKEN / DROPBOX_AUTH_TOKEN_SECRET to reuse this session.");
    Ok(())
}

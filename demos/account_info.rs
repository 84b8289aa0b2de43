//! Print account details for the authenticated user.

mod common;

use dropboxlib::Result;

#[tokio::main]
async fn main() -> Result<()> {
    common::init_tracing();

    let client = common::client_from_env();
    common::login(&client).await?;

    let info = client.account_info().await?;
    println!("Display name: {}", info.display_name);
    println!("Email:        {}", info.email);
    println!("Uid:          {}", info.uid);
    if let Some(country) = &info.country {
        println!("Country:      {}", country);
    }
    println!(
        "Quota:        {} used / {} total bytes",
        info.quota_info.used(),
        info.quota_info.quota
    );
    Ok(())
}

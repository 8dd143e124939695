use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    ghchat::logging::init();
    ghchat::run().await
}

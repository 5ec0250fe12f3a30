#[tokio::main]
async fn main() -> anyhow::Result<()> {
    diamond_digest::cli::app::run().await
}

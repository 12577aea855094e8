#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shortcodebot::run().await
}

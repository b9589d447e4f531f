#[tokio::main]
async fn main() -> anyhow::Result<()> {
    azwrap::app::run().await
}

use torrust_tracker_dashboard::console;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    console::app::run().await
}

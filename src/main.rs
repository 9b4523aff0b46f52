#[tokio::main]
async fn main() -> anyhow::Result<()> {
    market_pulse_lib::run().await
}

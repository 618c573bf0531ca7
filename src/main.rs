use kinex::{cli, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = logger::init() {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    cli::main().await
}

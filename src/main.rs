//! Txweb main entry point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;
use txweb_api::start_server;
use txweb_config::Config;
use txweb_data::{DatasetStore, JsonDatasetSource};

#[derive(Parser, Debug)]
#[command(name = "txweb")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web viewer for transaction list exports", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = if args.config.exists() {
            Config::load(args.config.clone()).expect("Failed to load configuration")
        } else {
            eprintln!(
                "[WARN] Config file not found: {}, using defaults",
                args.config.display()
            );
            Config::default()
        };

        eprintln!(
            "[INFO] Config loaded: data path={}, list_file={}",
            config.data.path.to_string_lossy(),
            config.data.list_file
        );

        let source = Arc::new(JsonDatasetSource);
        let store = Arc::new(RwLock::new(DatasetStore::new(config.clone(), source)));

        let data_path = config.list_path();
        eprintln!(
            "[INFO] Looking for transaction list: {}",
            data_path.to_string_lossy()
        );

        if data_path.exists() {
            eprintln!("[INFO] Transaction list found, loading...");
            let mut store_guard = store.write().await;
            match store_guard.load().await {
                Ok(_) => eprintln!("[INFO] Dataset loaded successfully"),
                Err(e) => eprintln!("[ERROR] Failed to load dataset: {:?}", e),
            }
        } else {
            eprintln!("[WARN] Transaction list not found: {}", data_path.display());
        }

        start_server(config, store).await
    });

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

/// Command-line overrides for the server; anything omitted comes from the environment
#[derive(Debug, Parser)]
#[command(name = "product-catalog-api")]
#[command(about = "Product catalog CRUD API backed by a JSON flat file")]
#[command(version)]
pub struct Cli {
    #[arg(long, short = 'f', help = "JSON file used to seed the product collection")]
    pub products_file: Option<PathBuf>,

    #[arg(long, help = "Address to bind")]
    pub host: Option<String>,

    #[arg(long, short, help = "Port to listen on")]
    pub port: Option<u16>,

    #[arg(long, help = "Write every mutation back to the products file")]
    pub persist: bool,
}

impl Cli {
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(path) = self.products_file {
            config.store.products_file = path;
        }
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.persist {
            config.store.persist_on_write = true;
        }
        config
    }
}

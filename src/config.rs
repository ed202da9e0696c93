//! Service configuration, read from the command line with environment fallbacks.

use clap::Parser;

use crate::model::StoreConfig;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "beanstore")]
#[command(about = "Products, orders and users over a key-value store")]
pub struct ServiceConfig {
    /// Address the HTTP API listens on
    #[arg(long, env = "BEANSTORE_BIND", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// Most items a single store scan call evaluates
    #[arg(
        long,
        env = "BEANSTORE_MAX_SCAN_BATCH",
        default_value_t = 100,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_scan_batch: u32,

    /// Enable verbose debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServiceConfig {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            max_scan_batch: self.max_scan_batch as usize,
        }
    }

    /// Default `tracing` directive when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "beanstore=debug,info"
        } else {
            "info"
        }
    }
}

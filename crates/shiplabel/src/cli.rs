use clap::Parser;

/// shiplabel — shipment-label generation service with Code 128C barcodes.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Address to bind the API server to.
    #[arg(long, default_value = "127.0.0.1", env = "SHIPLABEL_BIND")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, default_value = "3090", env = "SHIPLABEL_PORT")]
    pub port: u16,

    /// Upper bound on the duplicate check against the label store,
    /// in seconds.
    #[arg(long, default_value = "10", env = "SHIPLABEL_CHECK_TIMEOUT_SECS")]
    pub check_timeout_secs: u64,
}

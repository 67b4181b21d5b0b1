use clap::Parser;
use log::error;

/// Estimate ERGM parameters by equilibrium expectation.
#[derive(Parser)]
#[command(name = "estimate", about = "Estimate ERGM parameters by equilibrium expectation.")]
struct Arguments {
    /// Path of the configuration file.
    config: String,
    /// Rank of this run within the multi-process harness; seeds the PRNG
    /// and suffixes the output files.
    #[arg(long, default_value_t = 0)]
    rank: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let arguments = Arguments::parse();
    let config = match ergm::Config::load(&arguments.config) {
        Ok(config) => config,
        Err(message) => {
            error!("{}", message);
            std::process::exit(1);
        }
    };
    if let Err(message) = ergm::run_estimation(&config, arguments.rank) {
        error!("{}", message);
        std::process::exit(1);
    }
}

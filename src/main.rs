use anyhow::Result;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "URITEMPLATE_LOG";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let matches = uritemplate::cli::build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let output = uritemplate::cli::run(&matches)?;
    println!("{}", output);
    Ok(())
}

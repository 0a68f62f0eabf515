use anyhow::Result;
use mail_metrics::cli;

fn main() -> Result<()> {
    cli::run()
}

use anyhow::Result;
use record_progression::cli;

// Main entry point
fn main() -> Result<()> {
    cli::handle_calls()
}

use anyhow::Result;

fn main() -> Result<()> {
    qaverdict::cli::run()
}

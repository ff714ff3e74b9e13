use anyhow::Result;

fn main() -> Result<()> {
    goext::cli::run()
}

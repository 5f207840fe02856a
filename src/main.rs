use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = process_palette::cli::Cli::parse();
    process_palette::cli::run(cli)?;
    Ok(())
}

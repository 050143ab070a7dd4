mod cli;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // `--verbose` also prints per-tick ray statistics
    let level = if args.iter().any(|a| a == "--verbose") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    cli::run_cli_tests()
}

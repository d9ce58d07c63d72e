use clap::Parser;
use screen_locator::cli::commands::{cmd_check, cmd_fingerprint, cmd_locate, cmd_mark, format_blocked};
use screen_locator::cli::config::{Cli, Commands, build_batch_config, load_config, resolve_blocklist_source};
use screen_locator::logging::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Locate {
            paths,
            counting,
            output,
        } => {
            let batch_config = build_batch_config(counting, &config);
            cmd_locate(&paths, &batch_config, output.as_deref())?;
        }
        Commands::Fingerprint { path } => {
            println!("{}", cmd_fingerprint(&path)?);
        }
        Commands::Check { path, blocklist } => {
            let source = resolve_blocklist_source(blocklist.as_deref(), &config);
            let blocked = cmd_check(&path, source.as_deref())?;
            print!("{}", format_blocked(&blocked));
        }
        Commands::Mark { path, hash, output } => {
            if !cmd_mark(&path, hash, output.as_deref())? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

use std::io;
use std::process::ExitCode;
use word_chamber::cli::{Cli, CliInterface, parse_cli};
use word_chamber::config::{DICTIONARY_FILE, PUZZLES_FILE, resolve_data_path};
use word_chamber::logging::init_logger;
use word_chamber::tui::TuiInterface;
use word_chamber::{
    Game, GameError, game_loop, info_log, load_catalog_from_file, load_dictionary_from_file,
};

fn run(cli: &Cli) -> Result<(), GameError> {
    let config = cli.game_config();
    config.validate()?;

    let dictionary_path = resolve_data_path(cli.dictionary_path.as_deref(), DICTIONARY_FILE);
    let dictionary = load_dictionary_from_file(&dictionary_path)?;

    let puzzles_path = resolve_data_path(cli.puzzles_path.as_deref(), PUZZLES_FILE);
    let catalog = load_catalog_from_file(&puzzles_path)?;

    let mut game = Game::with_seed(config, dictionary, catalog, cli.seed)?;
    info_log!("Starting session, plain={}", cli.plain);
    if cli.plain {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&mut game, &mut interface);
    } else {
        let mut interface = TuiInterface::new()?;
        game_loop(&mut game, &mut interface);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = init_logger(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

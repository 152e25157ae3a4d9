use std::io;
use std::process::ExitCode;

use tracing::{error, Level};

use mailbox_chess::utils::play_session::{run_session, SessionConfig};

fn main() -> ExitCode {
    let config = match SessionConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            eprintln!(
                "usage: mailbox_chess [--white human|minimax|random] [--black human|minimax|random] \
                 [--depth N] [--seed N] [--fen FEN] [--max-plies N] [--verbose]"
            );
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if config.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match run_session(&config, stdin.lock(), &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "session failed");
            ExitCode::FAILURE
        }
    }
}

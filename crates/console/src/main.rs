use std::io::{self, IsTerminal};

use anyhow::Context;

use ims_console::{ConsoleConfig, Session};

fn main() -> anyhow::Result<()> {
    let mut config = ConsoleConfig::from_env().context("failed to load configuration")?;
    ims_observability::init(config.log_format);

    // Escape codes only make sense on a real terminal.
    config.clear_screen &= io::stdout().is_terminal();

    tracing::info!(
        currency_symbol = %config.currency_symbol,
        clear_screen = config.clear_screen,
        "starting inventory console"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), config);
    session.run()
}

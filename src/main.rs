mod app;
mod logging;
mod terminal;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use app::{load_config, Document, Editor, KeyDecoder, Session};
use terminal::{StdinBytes, TerminalGuard};

const HELP: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit";

fn main() {
    if let Err(err) = run() {
        logging::error(format!("fatal: {err:#}"));
        eprintln!("quill: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = load_config()?;
    logging::init(config.log_file.as_deref());
    logging::info("starting");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let document = match &path {
        Some(p) => Document::open(p, config.tab_stop)
            .with_context(|| format!("cannot open {}", p.display()))?,
        None => Document::new(config.tab_stop),
    };
    if let Some(p) = &path {
        logging::info(format!("opened {} ({} lines)", p.display(), document.len()));
    }

    let _guard = TerminalGuard::enter()?;
    let mut input = StdinBytes::spawn();
    let (rows, cols) =
        terminal::window_size(&mut input, &mut io::stdout()).context("reading window size")?;
    let viewport = ui::viewport_for_terminal(rows, cols)?;

    let mut editor = Editor::new(document, &config, viewport);
    editor.set_status(HELP);
    let out = terminal::unbuffered_stdout().context("opening stdout")?;
    let mut session = Session::new(editor, KeyDecoder::new(input), out);
    session.run()
}

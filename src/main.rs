mod config;
mod errors;
mod logging;
mod models;
mod storage;
mod ui;

use std::io;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{error, info};

use crate::config::Config;
use crate::errors::AppResult;
use crate::storage::{EntryStore, FileKeyValueStore, KeyValueStore};
use crate::ui::{App, render};

fn main() -> AppResult<()> {
    let config = Config::load()?;
    let data_dir = config.data_dir()?;
    logging::init(&data_dir.join("worklog.log"), &config.log_level)?;

    // 加载记录 (~/.local/share/worklog/workRecords.json)
    let backend = FileKeyValueStore::new(&data_dir);
    let data_path = backend.path_for(&config.storage_key);
    let store = EntryStore::open(backend, config.storage_key.clone(), config.max_entries);

    // 创建应用状态
    let mut app = App::new(store, config.page_size);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("event loop failed: {e}");
    }
    info!("exiting");
    println!("Records are stored in {}", data_path.display());

    result
}

fn run_app<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> AppResult<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && ui::handle_key_event(app, key.code) {
                break;
            }
        }
    }
    Ok(())
}

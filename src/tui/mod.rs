pub mod app;
pub mod article_view;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::config::Config;

use self::app::{ActivePane, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    tui_app.offline = ctx.is_offline();
    let event_handler = EventHandler::new(Duration::from_millis(100));

    tui_app.is_loading = true;
    terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;
    load_home(&mut tui_app, &ctx).await;

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        let key = match event_handler.next()? {
            AppEvent::Key(key) => key,
            AppEvent::Tick => continue,
        };

        match config.keybindings.get_action(&key) {
            Action::Quit => tui_app.should_quit = true,
            Action::MoveUp => tui_app.move_up(),
            Action::MoveDown => tui_app.move_down(),
            Action::NextPage => tui_app.next_page(),
            Action::PrevPage => tui_app.prev_page(),
            Action::ToggleMaximize => tui_app.toggle_maximize(),
            Action::NextPane => tui_app.active_pane = tui_app.active_pane.next(),
            Action::PrevPane => tui_app.active_pane = tui_app.active_pane.prev(),
            Action::Select => {
                if tui_app.active_pane == ActivePane::Articles {
                    let id = tui_app.selected_article().map(|a| a.id.clone());
                    if let Some(id) = id {
                        open_article(&mut tui_app, &ctx, &id).await;
                    }
                }
            }
            Action::Back => {
                if tui_app.reader.is_some() {
                    tui_app.close_article();
                }
            }
            Action::NextCategory => {
                let filter = tui_app.next_filter();
                tui_app.is_loading = true;
                terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

                tui_app.articles = ctx.load_feed(&filter).await;
                tui_app.is_loading = false;
                tui_app.set_status(format!(
                    "{}: {} articles",
                    filter.label(),
                    tui_app.articles.len()
                ));
            }
            Action::ToggleBookmark => match tui_app.toggle_bookmark() {
                Some(true) => tui_app.set_status("Bookmarked".to_string()),
                Some(false) => tui_app.set_status("Bookmark removed".to_string()),
                None => {}
            },
            Action::NextLink => match tui_app.next_link() {
                Some(href) => tui_app.set_status(format!("Link: {}", href)),
                None => tui_app.set_status("No links in this article".to_string()),
            },
            Action::OpenLink => {
                let href = tui_app
                    .reader
                    .as_ref()
                    .and_then(|r| r.selected_link())
                    .map(str::to_string);
                match href {
                    Some(href) => {
                        if let Err(e) = open::that(&href) {
                            tracing::warn!("Failed to open {}: {}", href, e);
                            tui_app.set_status(format!("Failed to open browser: {}", e));
                        } else {
                            tui_app.set_status(format!("Opened {}", href));
                        }
                    }
                    None => tui_app.set_status("No link to open".to_string()),
                }
            }
            Action::Share => match tui_app.share_message() {
                Some(message) => tui_app.set_status(message),
                None => tui_app.set_status("Open an article to share it".to_string()),
            },
            Action::Refresh => {
                tui_app.is_loading = true;
                terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

                load_home(&mut tui_app, &ctx).await;
                tui_app.set_status(format!("Refreshed: {} articles", tui_app.articles.len()));
            }
            Action::None => tui_app.clear_status(),
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn load_home(tui_app: &mut TuiApp, ctx: &AppContext) {
    let filter = tui_app.current_filter().clone();
    let home = ctx.load_home(&filter).await;
    tui_app.set_home(home);
    tui_app.is_loading = false;
}

async fn open_article(tui_app: &mut TuiApp, ctx: &AppContext, id: &str) {
    match ctx.load_article(id).await {
        Ok(article) => {
            let nodes = ctx.render(&article);
            tui_app.open_article(article, nodes);
            tui_app.clear_status();
        }
        Err(e) => {
            tracing::warn!("Failed to open article {}: {}", id, e);
            tui_app.set_status(format!("Error: {}", e));
        }
    }
}

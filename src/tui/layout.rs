use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::tui::app::{ActivePane, TuiApp};
use crate::tui::article_view;

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    if app.maximized {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Reader pane (full height)
                Constraint::Length(1), // Status bar
            ])
            .split(frame.area());

        let max_scroll = render_reader_pane(frame, app, chunks[0], colors);
        app.set_reader_max_scroll(max_scroll);
        render_status_bar(frame, app, chunks[1], colors);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),      // Category bar
                Constraint::Percentage(35), // Articles pane
                Constraint::Min(10),        // Reader pane
                Constraint::Length(1),      // Status bar
            ])
            .split(frame.area());

        render_category_bar(frame, app, chunks[0], colors);
        render_articles_pane(frame, app, chunks[1], colors);
        let max_scroll = render_reader_pane(frame, app, chunks[2], colors);
        app.set_reader_max_scroll(max_scroll);
        render_status_bar(frame, app, chunks[3], colors);
    }
}

fn border_style(active: bool, colors: &ColorConfig) -> Style {
    if active {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn render_category_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let mut spans = Vec::new();
    for (i, filter) in app.filters.iter().enumerate() {
        let style = if i == app.filter_index {
            Style::default()
                .fg(colors.category_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(colors.category)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_articles_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Articles;

    let items: Vec<ListItem> = app
        .articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let marker = if app.is_bookmarked(&article.id) {
                Span::styled("♥ ", Style::default().fg(colors.bookmark))
            } else {
                Span::raw("  ")
            };

            // The first article is the featured card
            let title_style = if i == 0 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let meta = format!(
                "  {} · {} · {} min",
                article.author, article.date, article.read_time
            );

            ListItem::new(Line::from(vec![
                marker,
                Span::styled(article.display_title().to_string(), title_style),
                Span::styled(meta, Style::default().fg(colors.metadata)),
            ]))
        })
        .collect();

    let title = format!(
        " {} ({}) [{}/{}] ",
        app.current_filter().label(),
        app.articles.len(),
        (app.article_index + 1).min(app.articles.len().max(1)),
        app.articles.len().max(1)
    );

    let highlight_style = if is_active {
        Style::default()
            .bg(colors.selection_bg_active)
            .fg(colors.selection_fg_active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(colors.selection_bg_inactive)
            .fg(colors.selection_fg_inactive)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.article_list_state);
}

/// Rows the lines take once wrapped to `width` columns.
fn wrapped_height(lines: &[Line], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

/// Draws the reader and returns how far its content can scroll.
fn render_reader_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) -> u16 {
    let is_active = app.active_pane == ActivePane::Reader;

    let (title, content) = if let Some(reader) = &app.reader {
        let article = &reader.article;
        let mut lines = vec![
            Line::from(Span::styled(
                article.display_title(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{} · {} · {} · {} min read · {} views",
                    article.category,
                    article.author,
                    article.date,
                    article.read_time,
                    article.views
                ),
                Style::default().fg(colors.metadata),
            )),
        ];
        if !article.image.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("[image] {}", article.image),
                Style::default().fg(colors.inactive_border),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("─".repeat(area.width.saturating_sub(2) as usize)));
        lines.push(Line::from(""));
        lines.extend(article_view::node_lines(
            &reader.nodes,
            colors,
            reader.link_index.and(reader.selected_link()),
        ));

        let marker = if app.is_bookmarked(&article.id) { "♥ " } else { "" };
        (
            format!(" {}{} ", marker, article.display_title()),
            Text::from(lines),
        )
    } else {
        (
            " Reader ".to_string(),
            Text::from("Press Enter to open the selected article"),
        )
    };

    let inner = area.inner(Margin::new(1, 1));
    let overflow = wrapped_height(&content.lines, inner.width).saturating_sub(inner.height.into());
    let max_scroll = u16::try_from(overflow).unwrap_or(u16::MAX);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.reader_scroll.min(max_scroll), 0));

    frame.render_widget(paragraph, area);
    max_scroll
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if app.is_loading {
        "Loading...".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.maximized {
        "j/k:Scroll  n/p:Page  l:Link  o:Open  b:Bookmark  m:Exit maximize  q:Quit".to_string()
    } else {
        let mode = if app.offline { "[offline]  " } else { "" };
        format!(
            "{}j/k:Nav  Tab:Pane  Enter:Read  Esc:Back  c:Category  b:Bookmark  l:Link  o:Open  s:Share  R:Refresh  m:Max  q:Quit",
            mode
        )
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

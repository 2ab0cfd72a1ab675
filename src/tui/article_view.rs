//! Styling of presentation nodes for the reader pane.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::config::ColorConfig;
use crate::render::{DecoratedSpan, PresentationNode};

/// Lines for `nodes`, with a blank line between nodes. The span linking to
/// `selected_link` is highlighted.
pub fn node_lines<'a>(
    nodes: &'a [PresentationNode],
    colors: &ColorConfig,
    selected_link: Option<&str>,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(node_to_lines(node, colors, selected_link));
    }
    lines
}

fn node_to_lines<'a>(
    node: &'a PresentationNode,
    colors: &ColorConfig,
    selected_link: Option<&str>,
) -> Vec<Line<'a>> {
    match node {
        PresentationNode::DropCap { first, rest } => split_lines(vec![
            Span::styled(
                first.as_str(),
                Style::default()
                    .fg(colors.drop_cap)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(rest.as_str()),
        ]),
        PresentationNode::Quote { text } => {
            let style = Style::default()
                .fg(colors.quote)
                .add_modifier(Modifier::ITALIC);
            text.split('\n')
                .map(|line| {
                    Line::from(vec![
                        Span::styled("▌ ", Style::default().fg(colors.drop_cap)),
                        Span::styled(line, style),
                    ])
                })
                .collect()
        }
        PresentationNode::Heading { level, spans } => {
            let mut heading = Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD);
            if *level <= 2 {
                heading = heading.add_modifier(Modifier::UNDERLINED);
            }
            split_lines(
                spans
                    .iter()
                    .map(|s| {
                        let base = span_style(s, colors, selected_link);
                        Span::styled(s.text.as_str(), heading.patch(base))
                    })
                    .collect(),
            )
        }
        PresentationNode::Bullet { prefix, spans } => {
            let mut styled = vec![Span::raw(format!("{} ", prefix))];
            styled.extend(spans.iter().map(|s| decorated(s, colors, selected_link)));
            split_lines(styled)
        }
        PresentationNode::Paragraph { spans } => split_lines(
            spans
                .iter()
                .map(|s| decorated(s, colors, selected_link))
                .collect(),
        ),
        PresentationNode::Image { url } => vec![Line::from(Span::styled(
            format!("[image] {}", url),
            Style::default()
                .fg(colors.inactive_border)
                .add_modifier(Modifier::ITALIC),
        ))],
    }
}

/// Break styled spans into lines at embedded newlines. Ratatui would
/// otherwise drop the `\n` and run the lines together.
fn split_lines(spans: Vec<Span<'_>>) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span> = Vec::new();

    for span in spans {
        if !span.content.contains('\n') {
            current.push(span);
            continue;
        }
        for (i, part) in span.content.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            if !part.is_empty() {
                current.push(Span::styled(part.to_string(), span.style));
            }
        }
    }

    lines.push(Line::from(current));
    lines
}

fn decorated<'a>(span: &'a DecoratedSpan, colors: &ColorConfig, selected_link: Option<&str>) -> Span<'a> {
    Span::styled(span.text.as_str(), span_style(span, colors, selected_link))
}

fn span_style(span: &DecoratedSpan, colors: &ColorConfig, selected_link: Option<&str>) -> Style {
    let mut style = Style::default();
    if span.bold {
        style = style.fg(colors.strong).add_modifier(Modifier::BOLD);
    }
    if span.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if let Some(href) = &span.link {
        style = style.fg(colors.link).add_modifier(Modifier::UNDERLINED);
        if selected_link == Some(href.as_str()) {
            style = style.add_modifier(Modifier::REVERSED);
        }
    }
    style
}

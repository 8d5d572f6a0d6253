use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use super::app::{App, Focus};
use super::detail::EMPTY_DETAIL;
use super::keys::{self, Binding};
use super::layout::{HELP_HEIGHT, MARGIN_HEIGHT, MARGIN_WIDTH};
use super::theme::Theme;

pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(MARGIN_WIDTH / 2)
        .vertical_margin(MARGIN_HEIGHT / 2)
        .constraints([Constraint::Min(0), Constraint::Length(HELP_HEIGHT)])
        .split(frame.size());

    let layout = app.layout();
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(layout.list_width as u16),
            Constraint::Length(layout.detail_width as u16),
            Constraint::Min(0),
        ])
        .split(rows[0]);

    render_list(frame, app, theme, panes[0]);
    render_detail(frame, app, theme, panes[1]);
    render_help(frame, app, theme, rows[1]);
}

fn pane_block(theme: &Theme, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border(focused))
}

fn render_list(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = pane_block(theme, app.focus() == Focus::List);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let mut title = vec![Span::styled(format!(" {} ", app.title()), theme.title)];
    if let Some(frame_glyph) = app.spinner() {
        title.push(Span::raw(" "));
        title.push(Span::raw(frame_glyph));
    }
    frame.render_widget(Paragraph::new(Line::from(title)), chunks[0]);

    let status = if app.is_filtering() {
        Line::from(vec![Span::raw("Filter: "), Span::raw(app.filter_text()), Span::raw("_")])
    } else if !app.filter_text().is_empty() {
        let shown = app.visible().len();
        Line::from(Span::styled(
            format!("“{}” {} of {} services", app.filter_text(), shown, app.services().len()),
            theme.status,
        ))
    } else {
        let count = app.services().len();
        let noun = if count == 1 { "service" } else { "services" };
        Line::from(Span::styled(format!("{} {}", count, noun), theme.status))
    };
    frame.render_widget(Paragraph::new(status), chunks[1]);

    let selected = app.selected();
    let items = app
        .list_rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let lines = if selected == Some(i) {
                vec![
                    Line::from(Span::styled(format!("│ {}", row.title), theme.selected_title)),
                    Line::from(Span::styled(format!("│ {}", row.subtitle), theme.selected_subtitle)),
                ]
            } else {
                vec![
                    Line::from(format!("  {}", row.title)),
                    Line::from(Span::styled(format!("  {}", row.subtitle), theme.subtitle)),
                ]
            };
            ListItem::new(lines)
        })
        .collect::<Vec<_>>();

    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(List::new(items), chunks[2], &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = pane_block(theme, app.focus() == Focus::Detail);

    let lines = match app.detail_lines() {
        Some(lines) => lines
            .into_iter()
            .map(|(gutter, text)| Line::from(vec![Span::styled(gutter, theme.label), Span::raw(text)]))
            .collect(),
        None => vec![Line::from(EMPTY_DETAIL)],
    };

    let scroll = u16::try_from(app.detail_scroll()).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let focus = app.focus();
    let lines = if app.show_full_help() {
        keys::full_help(focus)
            .iter()
            .map(|group| help_line(group, theme))
            .collect()
    } else {
        vec![help_line(&keys::short_help(focus), theme)]
    };

    frame.render_widget(Paragraph::new(lines), area);
}

fn help_line(bindings: &[Binding], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, binding) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", theme.help_desc));
        }
        spans.push(Span::styled(binding.key, theme.help_key));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(binding.desc, theme.help_desc));
    }
    Line::from(spans)
}

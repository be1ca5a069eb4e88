//! Rendering: header, notice, search box, filter bar, model list, details, hints.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::core::app;
use crate::core::models::{
    EMBED_ACTION, Family, Listing, ModelRecord, Notice, PLACEHOLDER, TEXT_ACTION,
};
use crate::core::util::{format_token_limit, truncate_chars};

use super::app::App;
use super::constants::{ACCENT, ACCENT_SECONDARY, SPINNER, WARNING};

const DIM: Style = Style::new().fg(Color::DarkGray);

pub(crate) fn draw(f: &mut Frame, app: &mut App, listing: Option<&Listing>) {
    let notice = listing.and_then(Listing::notice);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(if notice.is_some() { 1 } else { 0 }),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let records: &[ModelRecord] = listing.map(Listing::records).unwrap_or(&[]);
    let visible = app.visible(records);
    app.clamp_selection(visible.len());

    draw_header(f, chunks[0], app, listing, visible.len());
    if let Some(notice) = notice {
        draw_notice(f, chunks[1], &notice);
    }
    draw_search(f, chunks[2], app);
    draw_filter_bar(f, chunks[3], app);

    let body = chunks[4];
    if app.expanded && !visible.is_empty() {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(body);
        draw_list(f, split[0], app, &visible);
        draw_details(f, split[1], visible[app.selected]);
    } else {
        draw_list(f, body, app, &visible);
    }
    draw_hints(f, chunks[5]);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, listing: Option<&Listing>, shown: usize) {
    let status = if let Some(started) = app.fetch_started_at {
        let frame = (started.elapsed().as_millis() / 120) as usize % SPINNER.len();
        Span::styled(format!("{} fetching models…", SPINNER[frame]), DIM)
    } else {
        match listing {
            Some(l) if l.is_fallback() => Span::styled(
                format!("built-in catalog · {}/{}", shown, l.records().len()),
                Style::default().fg(WARNING),
            ),
            Some(l) => Span::styled(
                format!("live · {}/{}", shown, l.records().len()),
                Style::default().fg(ACCENT_SECONDARY),
            ),
            None => Span::styled("no data", DIM),
        }
    };
    let line = Line::from(vec![
        Span::styled(
            format!("◆ {} ", app::NAME),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("v{}  ", app::VERSION), DIM),
        status,
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_notice(f: &mut Frame, area: Rect, notice: &Notice) {
    let line = match notice {
        Notice::Warning(msg) => Line::from(Span::styled(
            format!("⚠ {}", msg),
            Style::default().fg(WARNING),
        )),
        Notice::Info(msg) => Line::from(Span::styled(format!("ℹ {}", msg), DIM)),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
    let query = &app.criteria.text_query;
    let content = if query.is_empty() {
        Span::styled("Search id, name, description, family, methods…", DIM)
    } else {
        Span::raw(query.as_str())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Search ");
    let inner = block.inner(area);
    f.render_widget(
        Paragraph::new(Line::from(content))
            .block(block)
            .style(Style::default().fg(Color::White)),
        area,
    );
    let cx = inner.x + query.chars().count().min(inner.width as usize) as u16;
    f.set_cursor_position(Position::new(cx, inner.y));
}

fn toggle_span(key: &str, label: &str, on: bool) -> Vec<Span<'static>> {
    let style = if on {
        Style::default().fg(ACCENT)
    } else {
        DIM.add_modifier(Modifier::CROSSED_OUT)
    };
    vec![
        Span::styled(format!("{} ", key), DIM),
        Span::styled(label.to_string(), style),
        Span::raw("  "),
    ]
}

fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let c = &app.criteria;
    let mut spans = Vec::new();
    for (i, family) in Family::ALL.into_iter().enumerate() {
        spans.extend(toggle_span(
            &format!("F{}", i + 1),
            family.slug(),
            c.families.contains(&family),
        ));
    }
    spans.push(Span::styled("│ ", DIM));
    for (key, label, on) in [
        ("F7", "★ only", c.recommended_only),
        ("F8", "active", c.active_only),
        ("F9", "text", c.requires(TEXT_ACTION)),
        ("F10", "embed", c.requires(EMBED_ACTION)),
    ] {
        let style = if on { Style::default().fg(ACCENT_SECONDARY) } else { DIM };
        spans.push(Span::styled(format!("{} ", key), DIM));
        spans.push(Span::styled(format!("[{}] {}", if on { "x" } else { " " }, label), style));
        spans.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn list_row(record: &ModelRecord, id_width: usize) -> Line<'static> {
    let star = if record.is_recommended() { "★ " } else { "  " };
    Line::from(vec![
        Span::styled(star, Style::default().fg(ACCENT)),
        Span::raw(format!(
            "{:<id_width$}",
            truncate_chars(record.short_id(), id_width)
        )),
        Span::styled(format!("  {:<24}", record.family().label()), DIM),
        Span::styled(
            format!(
                "{:>6} / {:<6}",
                format_token_limit(record.input_token_limit()),
                format_token_limit(record.output_token_limit())
            ),
            Style::default().fg(ACCENT_SECONDARY),
        ),
    ])
}

fn draw_list(f: &mut Frame, area: Rect, app: &mut App, visible: &[&ModelRecord]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(DIM)
        .title(" Models ");

    if visible.is_empty() {
        let text = if app.is_loading() {
            "Loading..."
        } else {
            "No models match the current filters."
        };
        let para = Paragraph::new(Line::from(Span::styled(
            text,
            DIM.add_modifier(Modifier::ITALIC),
        )))
        .block(block);
        f.render_widget(para, area);
        return;
    }

    let id_width = visible
        .iter()
        .map(|r| r.short_id().chars().count())
        .max()
        .unwrap_or(20)
        .clamp(12, 40);
    let items: Vec<ListItem> = visible
        .iter()
        .map(|r| ListItem::new(list_row(r, id_width)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(40, 48, 40))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

    app.list_state.select(Some(app.selected));
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), DIM),
        Span::raw(value),
    ])
}

fn draw_details(f: &mut Frame, area: Rect, record: &ModelRecord) {
    let opt = |v: Option<&str>| v.unwrap_or(PLACEHOLDER).to_string();
    let actions = if record.supported_actions().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        record.supported_actions().join(", ")
    };
    let mut lines = vec![
        Line::from(Span::styled(
            record.display_name_or_placeholder().to_string(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("ID", record.full_id().to_string()),
        field("Family", record.family().label().to_string()),
        field(
            "Recommended",
            if record.is_recommended() { "yes" } else { "no" }.to_string(),
        ),
        field("State", opt(record.state())),
        field("Version", opt(record.version())),
        field("Base model", opt(record.base_model())),
        field("Input tokens", format_token_limit(record.input_token_limit())),
        field("Output tokens", format_token_limit(record.output_token_limit())),
        field("Methods", actions),
    ];
    if let Some(t) = record.temperature() {
        lines.push(field("Temperature", t.to_string()));
    }
    if let (Some(p), Some(k)) = (record.top_p(), record.top_k()) {
        lines.push(field("Top-p / top-k", format!("{} / {}", p, k)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(record.description_or_placeholder().to_string()));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT_SECONDARY))
        .title(" Details ");
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_hints(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled("↑↓ ", Style::default().fg(ACCENT)),
        Span::styled("move  ", DIM),
        Span::styled("Enter ", Style::default().fg(ACCENT)),
        Span::styled("details  ", DIM),
        Span::styled("Ctrl+R ", Style::default().fg(ACCENT)),
        Span::styled("refresh  ", DIM),
        Span::styled("Esc ", Style::default().fg(ACCENT)),
        Span::styled("clear / quit", DIM),
    ]);
    f.render_widget(Paragraph::new(hints), area);
}

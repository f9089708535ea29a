use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::types::{Sentiment, Tier, WhaleCard};
use crate::ui::app::{
    format_price_cents, format_time_secs, format_time_short, format_usd, truncate, DashboardApp,
    FeedStatus,
};

pub fn render(f: &mut Frame, app: &DashboardApp, card_state: &mut TableState) {
    let area = f.area();

    // Outer vertical split: header | body | footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_body(f, app, card_state, chunks[1]);
    render_footer(f, app, chunks[2]);
}

// ---------------------------------------------------------------------------
// Header — feed status + stats strip
// ---------------------------------------------------------------------------

fn render_header(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let (status_text, status_color) = match &app.status {
        FeedStatus::Live => ("● live".to_string(), Color::Green),
        FeedStatus::Connecting => ("◌ connecting".to_string(), Color::Yellow),
        FeedStatus::Offline(e) => (format!("✗ offline: {}", truncate(e, 32)), Color::Red),
    };

    let stats = &app.snapshot.stats;
    let sentiment = stats.sentiment();
    let sentiment_color = match sentiment {
        Sentiment::Bullish => Color::Green,
        Sentiment::Bearish => Color::Red,
        Sentiment::NoData => Color::DarkGray,
    };
    let ratio_str = stats
        .buy_ratio_percent
        .map_or("—".to_string(), |p| format!("{p}% YES"));

    let mut spans = vec![
        Span::styled(
            " Whale Watch  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("  │  "),
        Span::styled(
            format!("vol ${}", format_usd(stats.total_volume)),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("max ${}", format_usd(stats.max_trade_size)),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("{} trades", stats.trade_count),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(format!("{ratio_str} "), Style::default().fg(Color::White)),
        Span::styled(
            sentiment.to_string(),
            Style::default()
                .fg(sentiment_color)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if app.snapshot.fetched_at > 0 {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            format!("updated {}", format_time_secs(app.snapshot.fetched_at)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Body — whale cards, or the quiet-ocean placeholder
// ---------------------------------------------------------------------------

fn render_body(f: &mut Frame, app: &DashboardApp, card_state: &mut TableState, area: Rect) {
    if app.snapshot.cards.is_empty() {
        render_empty_state(f, app, area);
    } else {
        render_cards_table(f, app, card_state, area);
    }
}

fn render_empty_state(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let lines = match app.status {
        FeedStatus::Connecting => vec![Line::from(Span::styled(
            "Waiting for the first fetch…",
            Style::default().fg(Color::DarkGray),
        ))],
        FeedStatus::Offline(_) => vec![
            Line::from(Span::styled(
                "Feed Offline",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Retrying on the next cycle.",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        FeedStatus::Live => vec![
            Line::from(Span::styled(
                "Ocean is Quiet",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "No trades found above the current threshold.",
                Style::default().fg(Color::DarkGray),
            )),
        ],
    };

    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
        area,
    );

    // Push the message toward the vertical center of the pane.
    let pad = (area.height.saturating_sub(4)) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(pad), Constraint::Min(0)])
        .split(area);

    let paragraph = Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center);
    f.render_widget(paragraph, chunks[1]);
}

fn render_cards_table(f: &mut Frame, app: &DashboardApp, state: &mut TableState, area: Rect) {
    let header_cells = ["Time", "Tier", "Market", "Size (USD)", "Position", "Trader"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app.snapshot.cards.iter().map(card_row).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(13),
            Constraint::Min(16),
            Constraint::Length(11),
            Constraint::Length(14),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                " WHALE FEED ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    f.render_stateful_widget(table, area, state);
}

fn card_row(card: &WhaleCard) -> Row<'_> {
    let trade = &card.trade;

    let tier_style = Style::default().fg(tier_color(card.tier));
    // Boss tier gets the visual weight the original gave its oversized icon.
    let tier_style = if card.tier == Tier::BlueWhale {
        tier_style.add_modifier(Modifier::BOLD)
    } else {
        tier_style
    };

    let position_color = if card.bullish { Color::Green } else { Color::Red };
    let position_label = if card.bullish { "BULLISH" } else { "BEARISH" };
    let position = match trade.price {
        Some(p) => format!("{position_label} ({})", format_price_cents(p)),
        None => position_label.to_string(),
    };

    let trader = trade
        .maker_address
        .as_deref()
        .map_or("—".to_string(), |a| truncate(a, 12));

    Row::new(vec![
        Cell::from(format_time_short(trade.timestamp)).style(Style::default().fg(Color::DarkGray)),
        Cell::from(format!("{} {}", card.tier.emoji(), card.tier.label())).style(tier_style),
        Cell::from(truncate(&trade.question, 48)),
        Cell::from(format!("${}", format_usd(trade.size_usd())))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(position).style(Style::default().fg(position_color)),
        Cell::from(trader).style(Style::default().fg(Color::DarkGray)),
    ])
}

/// Tier badge colors, mapped from the original palette: blue / cyan / rose /
/// violet, with slate for the floor tier.
fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Dolphin => Color::Blue,
        Tier::Shark => Color::Cyan,
        Tier::Whale => Color::Red,
        Tier::BlueWhale => Color::Magenta,
        Tier::Minnow => Color::DarkGray,
    }
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

fn render_footer(f: &mut Frame, app: &DashboardApp, area: Rect) {
    let latency_str = app
        .latency
        .percentiles_ms()
        .map_or("fetch: —".to_string(), |(p50, p95, p99)| {
            format!(
                "fetch p50/p95/p99: {p50:.0}/{p95:.0}/{p99:.0}ms ({} samples)",
                app.latency.len()
            )
        });

    let line = Line::from(vec![
        Span::styled(" [q] ", Style::default().fg(Color::Yellow)),
        Span::raw("quit  "),
        Span::styled("[r] ", Style::default().fg(Color::Yellow)),
        Span::raw("refresh  "),
        Span::styled("[↑↓ / j k] ", Style::default().fg(Color::Yellow)),
        Span::raw("scroll  "),
        Span::styled(
            format!("auto-refresh: {}s  ", app.refresh_interval_secs),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(latency_str, Style::default().fg(Color::DarkGray)),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

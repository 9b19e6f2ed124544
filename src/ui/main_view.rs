use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};
use std::time::{SystemTime, UNIX_EPOCH};

use super::utils::split_ascii_art;
use crate::app::App;
use crate::form::{ErrorKey, Field};
use crate::notification::MessageType;

const BANNER: &str = r#"
╦  ╔═╗╦ ╦╔═╗╦ ╔╦╗╦ ╦  ╔╦╗╦╔╗╔╔╦╗╔═╗╦═╗
║  ║ ║╚╦╝╠═╣║  ║ ╚╦╝  ║║║║║║║ ║ ║╣ ╠╦╝
╩═╝╚═╝ ╩ ╩ ╩╩═╝╩  ╩   ╩ ╩╩╝╚╝ ╩ ╚═╝╩╚═
"#;

const BASE_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::LightBlue;
const DIM_COLOR: Color = Color::DarkGray;

/// Render the minting screen
pub fn draw_main(f: &mut Frame, app: &mut App) {
    let time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    // Full screen border
    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(BASE_COLOR));
    f.render_widget(main_block, f.size());

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(4),   // banner
            Constraint::Length(1),   // network / wallet status
            Constraint::Length(12),  // form
            Constraint::Min(6),      // estimate + owned cards
            Constraint::Length(3),   // notification
            Constraint::Length(3),   // controls
        ])
        .split(f.size());

    let banner = Paragraph::new(split_ascii_art(BANNER, HIGHLIGHT_COLOR)).alignment(Alignment::Center);
    f.render_widget(banner, main_layout[0]);

    render_status(f, app, main_layout[1]);
    render_form(f, app, main_layout[2], time);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_layout[3]);
    render_estimate(f, app, lower[0]);
    render_cards(f, app, lower[1]);

    render_notification(f, app, main_layout[4]);
    render_controls(f, app, main_layout[5]);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let network = Paragraph::new(format!(
        "NETWORK: {}",
        app.network_state.get_current_network().to_uppercase()
    ))
    .style(Style::default().fg(BASE_COLOR))
    .alignment(Alignment::Center);
    f.render_widget(network, columns[0]);

    let build_on_sui = Paragraph::new("╔══════╡ BUILD ON SUI ╞══════╗")
        .style(Style::default().fg(BASE_COLOR))
        .alignment(Alignment::Center);
    f.render_widget(build_on_sui, columns[1]);

    let wallet_color = if app.is_connected() { Color::Green } else { Color::Red };
    let wallet = Paragraph::new(Line::from(vec![
        Span::styled("WALLET: ", Style::default().fg(BASE_COLOR)),
        Span::styled(app.wallet_address.clone(), Style::default().fg(wallet_color)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(wallet, columns[2]);
}

fn render_form(f: &mut Frame, app: &App, area: Rect, time: u64) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let form = app.orchestrator.form();
    let editable = app.is_connected() && !app.is_busy();
    let blink_cursor = time % 2 == 0;

    for (i, field) in Field::ALL.iter().enumerate() {
        let focused = *field == app.focus;
        let border_color = if !editable {
            DIM_COLOR
        } else if focused {
            HIGHLIGHT_COLOR
        } else {
            BASE_COLOR
        };

        let input_block = Block::default()
            .title(format!(" {} ", field.label()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let cursor = if focused && editable && blink_cursor { "█" } else { "" };
        let input = Paragraph::new(format!("{}{}", form.value(*field), cursor))
            .style(Style::default().fg(Color::White))
            .block(input_block);
        f.render_widget(input, rows[i * 2]);

        if let Some(error) = form.errors.get(ErrorKey::from(*field)) {
            let error_line = Paragraph::new(format!("  ✗ {}", error))
                .style(Style::default().fg(Color::Red));
            f.render_widget(error_line, rows[i * 2 + 1]);
        }
    }

    // the wallet error has no input of its own, show it on the last row
    if let Some(error) = form.errors.get(ErrorKey::Wallet) {
        if form.errors.get(ErrorKey::ImageUrl).is_none() {
            let error_line = Paragraph::new(format!("  ✗ {}", error))
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
            f.render_widget(error_line, rows[5]);
        }
    }
}

fn render_estimate(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" << GAS ESTIMATE >> ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BASE_COLOR));

    let lines = match app.orchestrator.cost_estimate() {
        Some(estimate) => vec![
            Line::from(vec![
                Span::styled("COMPUTATION: ", Style::default().fg(HIGHLIGHT_COLOR)),
                Span::raw(format!("{} MIST", estimate.computation)),
            ]),
            Line::from(vec![
                Span::styled("STORAGE:     ", Style::default().fg(HIGHLIGHT_COLOR)),
                Span::raw(format!("{} MIST", estimate.storage)),
            ]),
            Line::from(vec![
                Span::styled("REBATE:      ", Style::default().fg(HIGHLIGHT_COLOR)),
                Span::raw(format!("{} MIST", estimate.storage_rebate)),
            ]),
            Line::from(vec![
                Span::styled("NET:         ", Style::default().fg(HIGHLIGHT_COLOR)),
                Span::styled(
                    crate::utils::format_sui_amount(estimate.net()),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            "Press Ctrl+E to preview the cost",
            Style::default().fg(DIM_COLOR),
        ))],
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_cards(f: &mut Frame, app: &mut App, area: Rect) {
    let title = match app.lister.package_id() {
        Some(package_id) => format!(" << LOYALTY CARDS {} >> ", crate::utils::shorten_id(package_id)),
        None => " << LOYALTY CARDS >> ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BASE_COLOR));

    if app.lister.records().is_empty() {
        let empty = Paragraph::new("No cards loaded. Press Ctrl+R to refresh.")
            .style(Style::default().fg(DIM_COLOR))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .lister
        .records()
        .iter()
        .map(|card| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("◈ ", Style::default().fg(HIGHLIGHT_COLOR)),
                    Span::styled(card.get_short_id(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled("  → ", Style::default().fg(DIM_COLOR)),
                    Span::raw(card.get_short_recipient()),
                ]),
                Line::from(Span::styled(
                    format!("  {}", card.image_url),
                    Style::default().fg(DIM_COLOR),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Black).bg(HIGHLIGHT_COLOR))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.records_state);
}

fn render_notification(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(DIM_COLOR));

    let Some(notification) = app.notifications.current() else {
        f.render_widget(block, area);
        return;
    };

    let (prefix, color) = match notification.message_type {
        MessageType::Success => ("✓ ", Color::Green),
        MessageType::Error => ("✗ ", Color::Red),
        MessageType::Info => ("ℹ ", Color::Yellow),
    };
    let width = area.width.saturating_sub(6).max(10) as usize;
    let text = textwrap::wrap(&notification.message, width)
        .first()
        .map(|line| line.to_string())
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(text, Style::default().fg(color)),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_controls(f: &mut Frame, app: &App, area: Rect) {
    let help_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(DIM_COLOR));

    let mint_label = match app.activity {
        Some(activity) => format!("[ {} ]", activity.label()),
        None => "[ MINT NFT ]".to_string(),
    };
    let mint_style = if app.orchestrator.is_ready() && !app.is_busy() {
        Style::default().fg(Color::Black).bg(HIGHLIGHT_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM_COLOR)
    };

    let key = |k: &'static str| Span::styled(k, Style::default().fg(HIGHLIGHT_COLOR).add_modifier(Modifier::BOLD));
    let help_text = Line::from(vec![
        Span::styled(mint_label, mint_style),
        Span::raw("   "),
        key("ENTER"),
        Span::raw(" MINT  "),
        key("TAB"),
        Span::raw(" FIELD  "),
        key("^E"),
        Span::raw(" ESTIMATE  "),
        key("^R"),
        Span::raw(" CARDS  "),
        key("^N"),
        Span::raw(" NETWORK  "),
        key("ESC"),
        Span::raw(" DISMISS  "),
        key("^Q"),
        Span::raw(" QUIT"),
    ]);

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(DIM_COLOR))
        .alignment(Alignment::Center)
        .block(help_block);
    f.render_widget(help, area);
}

//! UI rendering with ratatui.
//!
//! The screen is a header bar, the search input, the directory beside the
//! details of the selected card, and a status bar. The invocation modal and
//! the splash are drawn on top.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use apidex_core::{CardSpacing, SubmitState};

use crate::app::{App, Modal};
use crate::runner::ResultContent;

/// Render the UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Directory and details
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header_bar(frame, app, main_layout[0]);
    render_search(frame, app, main_layout[1]);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_layout[2]);

    render_directory(frame, app, content_layout[0]);
    render_details(frame, app, content_layout[1]);
    render_status_bar(frame, app, main_layout[3]);

    if let Some(modal) = &app.modal {
        render_modal(frame, app, modal, area);
    }

    if app.splash {
        render_splash(frame, app, area);
    }
}

/// Render the header bar with name, version and status.
fn render_header_bar(frame: &mut Frame, app: &App, area: Rect) {
    let branding = &app.view.branding;
    let left = vec![
        Span::styled(
            branding.header.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        Span::raw(branding.name.as_str()),
    ];
    let right = vec![
        Span::raw(branding.version.as_str()),
        Span::raw(" ["),
        Span::styled(branding.status.as_str(), Style::default().fg(Color::Green)),
        Span::raw("]"),
    ];

    let padding = header_padding(&left, &right, area.width);
    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.extend(right);
    let line = Line::from(spans);

    let header = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

/// Columns left between the two halves of the header, measured in display
/// width rather than bytes.
fn header_padding(left: &[Span<'_>], right: &[Span<'_>], width: u16) -> usize {
    let used: usize = left.iter().chain(right).map(Span::width).sum();
    usize::from(width).saturating_sub(used)
}

/// Render the search input.
fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(if app.modal.is_none() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        });

    let input = if app.search.query().is_empty() {
        Paragraph::new("type to filter by name or description")
            .style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.search.query()).style(Style::default().fg(Color::Yellow))
    };

    frame.render_widget(input.block(block), area);
}

/// Render the category sections and their visible cards.
fn render_directory(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.view.branding.title))
        .borders(Borders::ALL);

    let mut items = Vec::new();
    let mut selected_row = None;
    let mut card_index = 0;

    for section in &app.view.sections {
        if !section.header_visible() {
            continue;
        }
        items.push(ListItem::new(Line::from(Span::styled(
            section.name.as_str(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ))));

        for card in section.visible_cards() {
            if card_index == app.selected {
                selected_row = Some(items.len());
            }
            card_index += 1;

            let mut lines = vec![Line::from(vec![
                Span::raw("  "),
                Span::raw(card.item.name.as_str()),
            ])];
            if card.spacing == CardSpacing::Trailing {
                lines.push(Line::from(""));
            }
            items.push(ListItem::new(Text::from(lines)));
        }
    }

    if app.visible_cards().is_empty() && !app.splash {
        let empty = Paragraph::new("No endpoints")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(selected_row);

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the selected card, the catalog description and the links.
fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Details ").borders(Borders::ALL);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Gateway: ", Style::default().fg(Color::Gray)),
            Span::raw(app.client().base_url()),
        ]),
        Line::from(""),
    ];
    if let Some(card) = app.selected_card() {
        lines.push(Line::from(Span::styled(
            card.item.name.as_str(),
            Style::default().fg(Color::Cyan).bold(),
        )));
        lines.push(Line::from(card.item.desc.as_str()));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("GET ", Style::default().fg(Color::Yellow)),
            Span::raw(card.item.path.as_str()),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        app.view.branding.description.as_str(),
        Style::default().fg(Color::Gray),
    )));

    if !app.view.links.is_empty() {
        lines.push(Line::from(""));
        for link in &app.view.links {
            lines.push(Line::from(vec![
                Span::styled(link.name.as_str(), Style::default().fg(Color::Blue).bold()),
                Span::raw(" "),
                Span::styled(link.url.as_str(), Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    let details = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(details, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(ref error) = app.error_message {
        Line::from(vec![
            Span::styled(" ERROR: ", Style::default().fg(Color::Red).bold()),
            Span::styled(error, Style::default().fg(Color::Red)),
        ])
    } else if app.modal.is_some() {
        Line::from(vec![
            Span::raw(" "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(":submit "),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(":next field "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(":close"),
        ])
    } else {
        Line::from(vec![
            Span::raw(" "),
            Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
            Span::raw(":select "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(":try it "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(":quit  "),
            Span::styled(app.view.branding.footer.as_str(), Style::default().fg(Color::Gray)),
        ])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

/// Render the invocation modal.
fn render_modal(frame: &mut Frame, app: &App, modal: &Modal, area: Rect) {
    let dialog_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(format!(" {} ", modal.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![Line::from(modal.desc.as_str()), Line::from("")];

    if let Some(form) = &modal.form {
        for (index, field) in form.fields().iter().enumerate() {
            let focused = index == modal.focused_field;
            let marker = if focused { "> " } else { "  " };
            let label_style = if field.invalid {
                Style::default().fg(Color::Red).bold()
            } else if focused {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };

            let value = if field.value.is_empty() {
                Span::styled(field.label.as_str(), Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(field.value.as_str(), Style::default().fg(Color::Yellow))
            };

            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{}: ", field.name), label_style),
                value,
            ]));
        }

        for help in form.inner_desc() {
            lines.push(Line::from(Span::styled(
                help.as_str(),
                Style::default().fg(Color::Gray).italic(),
            )));
        }

        let submit = match form.state() {
            SubmitState::Submitting => Span::styled("[Submitting]", Style::default().fg(Color::DarkGray)),
            SubmitState::Idle if form.submit_enabled() => {
                Span::styled("[Submit]", Style::default().fg(Color::Green).bold())
            }
            SubmitState::Idle => Span::styled("[Submit]", Style::default().fg(Color::DarkGray)),
        };
        lines.push(Line::from(""));
        lines.push(Line::from(submit));
        lines.push(Line::from(""));
    }

    let pane = &modal.result;
    if pane.loading {
        lines.push(Line::from(vec![
            Span::styled(app.spinner_char(), Style::default().fg(Color::Cyan)),
            Span::raw(" Loading..."),
        ]));
    }

    if pane.content_visible {
        if let Some(endpoint) = &pane.endpoint {
            lines.push(Line::from(vec![
                Span::styled("Endpoint used: ", Style::default().fg(Color::Gray)),
                Span::raw(endpoint.as_str()),
            ]));
        }

        match &pane.content {
            ResultContent::Empty => {}
            ResultContent::Json(text) => {
                lines.extend(text.lines().map(|l| Line::from(l.to_string())));
            }
            ResultContent::Image(object) => {
                lines.push(Line::from(Span::styled(
                    object.alt().to_string(),
                    Style::default().fg(Color::Cyan).bold(),
                )));
                lines.push(Line::from(format!(
                    "{}, {} bytes",
                    object.content_type(),
                    object.size()
                )));
                lines.push(Line::from(Span::styled(
                    object.url(),
                    Style::default().fg(Color::Blue).underlined(),
                )));
            }
            ResultContent::Notice(text) => {
                lines.push(Line::from(Span::styled(
                    text.as_str(),
                    Style::default().fg(Color::Yellow),
                )));
            }
            ResultContent::Error(text) => {
                lines.push(Line::from(Span::styled(
                    text.as_str(),
                    Style::default().fg(Color::Red),
                )));
            }
        }
    }

    let body = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(body, dialog_area);
}

/// Render the splash overlay.
fn render_splash(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(Clear, area);

    let inner = centered_rect(50, 20, area);
    let text = Text::from(vec![
        Line::from(Span::styled(
            app.view.branding.title.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(app.spinner_char(), Style::default().fg(Color::Cyan))),
    ])
    .centered();

    frame.render_widget(Paragraph::new(text), inner);
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use lichtrinh_core::catalog::{
    BUDGET_OPTIONS, COMPANION_OPTIONS, DURATION_MESSAGE, DURATION_OPTIONS, MAX_VIBES, VIBE_OPTIONS,
    budget_option, companion_option,
};
use lichtrinh_core::wizard::WizardStep;

use crate::app::App;

pub(super) fn draw(frame: &mut Frame<'_>, app: &App, step: WizardStep, area: Rect) {
    match step {
        WizardStep::Landing => draw_landing(frame, area),
        WizardStep::Review => draw_review(frame, app, area),
        WizardStep::Duration | WizardStep::Companion | WizardStep::Vibe | WizardStep::Budget => {
            draw_options(frame, app, step, area);
        }
    }
}

fn draw_landing(frame: &mut Frame<'_>, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from("Lịch trình chi tiết đến từng giờ")
            .bold()
            .centered(),
        Line::from("Chỉ cần 30 giây, mình lo hết: điểm đến, quán ăn và local tips ít ai biết")
            .centered(),
        Line::from(""),
        Line::from("[ Enter ] Lên lịch trình ngay ✨")
            .fg(Color::Green)
            .bold()
            .centered(),
        Line::from(""),
        Line::from("⏰ Chi tiết từng giờ | 💡 Local tips độc quyền | ⚡ Chỉ 30 giây")
            .fg(Color::DarkGray)
            .centered(),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn question(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Duration => "Đi mấy ngày nè?",
        WizardStep::Companion => "Đi cùng ai nè?",
        WizardStep::Vibe => "Trải nghiệm kiểu gì?",
        WizardStep::Budget => "Budget khoảng bao nhiêu?",
        WizardStep::Landing | WizardStep::Review => "",
    }
}

fn rows(app: &App, step: WizardStep) -> Vec<ListItem<'static>> {
    let mark = |selected: bool| if selected { "●" } else { "○" };
    match step {
        WizardStep::Duration => DURATION_OPTIONS
            .iter()
            .map(|option| {
                let selected = app.selections.duration.as_deref() == Some(option.code);
                let mut spans = vec![Span::raw(format!("{} {}", mark(selected), option.label))];
                if option.popular {
                    spans.push(Span::raw("  Phổ biến nhất").fg(Color::LightRed));
                }
                ListItem::new(Line::from(spans))
            })
            .collect(),
        WizardStep::Companion => COMPANION_OPTIONS
            .iter()
            .map(|option| {
                let selected = app.selections.companion.as_deref() == Some(option.code);
                ListItem::new(vec![
                    Line::from(format!("{} {} {}", mark(selected), option.emoji, option.label)),
                    Line::from(format!("     {}", option.subtitle))
                        .fg(Color::DarkGray),
                ])
            })
            .collect(),
        WizardStep::Vibe => VIBE_OPTIONS
            .iter()
            .map(|option| {
                let selected = app.selections.vibes.iter().any(|vibe| vibe == option.code);
                let check = if selected { "[x]" } else { "[ ]" };
                ListItem::new(format!("{check} {} {}", option.emoji, option.label))
            })
            .collect(),
        WizardStep::Budget => BUDGET_OPTIONS
            .iter()
            .map(|option| {
                let selected = app.selections.budget.as_deref() == Some(option.code);
                ListItem::new(vec![
                    Line::from(format!(
                        "{} {} {}  {}",
                        mark(selected),
                        option.emoji,
                        option.title,
                        option.range
                    )),
                    Line::from(format!("     {}", option.description))
                        .fg(Color::DarkGray),
                ])
            })
            .collect(),
        WizardStep::Landing | WizardStep::Review => Vec::new(),
    }
}

// Micro-copy confirming the current answer.
fn feedback_line(app: &App, step: WizardStep) -> Option<String> {
    let selections = &app.selections;
    match step {
        WizardStep::Duration => selections.duration.as_ref().map(|_| DURATION_MESSAGE.to_owned()),
        WizardStep::Companion => selections
            .companion
            .as_deref()
            .and_then(companion_option)
            .map(|option| option.message.to_owned()),
        WizardStep::Vibe => Some(format!(
            "Chọn tối đa {MAX_VIBES} vibe bạn thích nhất · đã chọn {}/{MAX_VIBES}",
            selections.vibes.len()
        )),
        WizardStep::Budget => selections
            .budget
            .as_deref()
            .and_then(budget_option)
            .map(|option| option.message.to_owned()),
        WizardStep::Landing | WizardStep::Review => None,
    }
}

fn draw_options(frame: &mut Frame<'_>, app: &App, step: WizardStep, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [list_area, message_area] = chunks else {
        return;
    };

    let list = List::new(rows(app, step))
        .block(Block::default().borders(Borders::ALL).title(question(step)))
        .highlight_symbol("> ")
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(Some(app.cursor));
    frame.render_stateful_widget(list, *list_area, &mut state);

    let message = Paragraph::new(feedback_line(app, step).unwrap_or_default())
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(message, *message_area);
}

fn draw_review(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [summary_area, button_area] = chunks else {
        return;
    };

    let items = app
        .selections
        .summary(&app.defaults)
        .into_iter()
        .map(|row| {
            let edit = if row.edit_step.is_some() { "  (e sửa)" } else { "" };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<10}", row.label)).bold(),
                Span::raw(row.value),
                Span::raw(edit).fg(Color::DarkGray),
            ]))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Chuẩn hết rồi, tạo lịch trình nha! 🎒"),
        )
        .highlight_symbol("> ")
        .highlight_style(Style::default().fg(Color::Yellow));

    let mut state = ListState::default();
    state.select(Some(app.cursor));
    frame.render_stateful_widget(list, *summary_area, &mut state);

    let label = Line::from("[ Enter ] Tạo lịch trình cho mình! ✨")
        .bold()
        .centered();
    let button = Paragraph::new(label)
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, *button_area);
}

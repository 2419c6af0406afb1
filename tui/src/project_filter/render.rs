use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;

use super::Category;
use super::ProjectFilterView;
use super::ProjectSummary;
use super::ViewStatus;
use crate::key_hint;
use crate::key_hint::Action;

const BRAND: &str = "Projects Showcase";
const LOADING_TEXT: &str = "Fetching projects…";
const ERROR_TITLE: &str = "Oops! Something Went Wrong";
const ERROR_DESCRIPTION: &str = "We cannot seem to find the page you are looking for";
const RETRY_LABEL: &str = " Retry ";
const EMPTY_TEXT: &str = "No projects found for this category.";
const IMAGE_PLACEHOLDER: &str = "No image";

/// Rows taken by one bordered project card.
pub(crate) const CARD_HEIGHT: u16 = 3;

impl Widget for &ProjectFilterView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header, categories, content, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        header_line(&self.assets().logo_url).render(header, buf);
        Paragraph::new(category_bar(self.categories(), self.state().category()))
            .block(Block::default().borders(Borders::BOTTOM).dim())
            .render(categories, buf);

        match self.state().status() {
            ViewStatus::Loading => render_loading(content, buf),
            ViewStatus::Error(message) => {
                render_error(content, buf, &self.assets().failure_image_url, message);
            }
            ViewStatus::Loaded(projects) if projects.is_empty() => render_empty(content, buf),
            ViewStatus::Loaded(projects) => render_cards(content, buf, projects, self.scroll_top()),
        }

        hint_line(self.state().status()).render(hints, buf);
    }
}

fn header_line(logo_url: &str) -> Line<'static> {
    Line::from(vec![
        BRAND.bold().cyan(),
        "  ".into(),
        Span::from(format!("[logo] {logo_url}")).dim(),
    ])
}

fn category_bar(categories: &[Category], selected: &str) -> Line<'static> {
    let mut spans = Vec::with_capacity(categories.len() * 2);
    for (idx, category) in categories.iter().enumerate() {
        if idx > 0 {
            spans.push(" │ ".dim());
        }
        if category.id == selected {
            spans.push(Span::from(format!("[{}]", category.display_text)).bold().cyan());
        } else {
            spans.push(Span::from(format!(" {} ", category.display_text)));
        }
    }
    Line::from(spans)
}

fn render_loading(area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(LOADING_TEXT.italic().dim()))
        .alignment(Alignment::Center)
        .render(top_padded(area), buf);
}

fn render_error(area: Rect, buf: &mut Buffer, failure_image_url: &str, message: &str) {
    let lines = vec![
        Line::from(Span::from(format!("[failure view] {failure_image_url}")).dim()),
        Line::from(""),
        Line::from(ERROR_TITLE.bold().red()),
        Line::from(ERROR_DESCRIPTION),
        Line::from(Span::from(message.to_string()).dim()),
        Line::from(""),
        Line::from(vec![
            RETRY_LABEL.reversed().bold(),
            "  ".into(),
            key_hint::plain(crossterm::event::KeyCode::Char('r')).into(),
            " to retry".dim(),
        ]),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(top_padded(area), buf);
}

fn render_empty(area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(EMPTY_TEXT.italic()))
        .alignment(Alignment::Center)
        .render(top_padded(area), buf);
}

fn render_cards(area: Rect, buf: &mut Buffer, projects: &[ProjectSummary], scroll_top: usize) {
    let capacity = usize::from(area.height / CARD_HEIGHT);
    if capacity == 0 {
        return;
    }
    let start = scroll_top.min(projects.len().saturating_sub(1));
    let mut y = area.y;
    for project in projects.iter().skip(start).take(capacity) {
        let rect = Rect::new(area.x, y, area.width, CARD_HEIGHT);
        project_card(project).render(rect, buf);
        y = y.saturating_add(CARD_HEIGHT);
    }
}

fn project_card(project: &ProjectSummary) -> Paragraph<'static> {
    let image = match project.image_url.as_deref() {
        Some(url) => Line::from(vec!["[image] ".dim(), Span::from(url.to_string())]),
        None => Line::from(IMAGE_PLACEHOLDER.italic().dim()),
    };
    Paragraph::new(image).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(Span::from(format!(" {} ", project.name)).bold())),
    )
}

fn hint_line(status: &ViewStatus) -> Line<'static> {
    let mut spans = key_hint::hint(&[Action::PreviousCategory, Action::NextCategory], "category");
    match status {
        ViewStatus::Loaded(projects) if !projects.is_empty() => {
            spans.push("    ".into());
            spans.extend(key_hint::hint(&[Action::ScrollUp, Action::ScrollDown], "scroll"));
            spans.push("    ".into());
            spans.push(Span::from(project_count(projects.len())).dim());
        }
        ViewStatus::Error(_) => {
            spans.push("    ".into());
            spans.extend(key_hint::hint(&[Action::Retry], "retry"));
        }
        _ => {}
    }
    spans.push("    ".into());
    spans.extend(key_hint::hint(&[Action::Quit], "quit"));
    Line::from(spans)
}

fn project_count(count: usize) -> String {
    if count == 1 {
        "1 project".to_string()
    } else {
        format!("{count} projects")
    }
}

fn top_padded(area: Rect) -> Rect {
    if area.height <= 1 {
        return area;
    }
    Rect::new(area.x, area.y + 1, area.width, area.height - 1)
}

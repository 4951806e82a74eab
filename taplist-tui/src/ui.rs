//! Rendering

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table};
use taplist_client::{COLUMNS, ColumnAlign, ListingSnapshot, SortOrder};
use tui_input::Input;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::Focus;

pub fn draw(frame: &mut Frame, snapshot: &ListingSnapshot, input: &Input, focus: Focus) {
    let [search_area, table_area, footer_area, log_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(1),
        Constraint::Length(8),
    ])
    .areas(frame.area());

    draw_search(frame, search_area, input, focus);
    draw_table(frame, table_area, snapshot);
    draw_footer(frame, footer_area, snapshot);
    draw_logs(frame, log_area);
}

fn draw_search(frame: &mut Frame, area: Rect, input: &Input, focus: Focus) {
    let border_style = if focus == Focus::Search {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let search = Paragraph::new(input.value())
        .scroll((0, scroll as u16))
        .block(
            Block::bordered()
                .title("Search by name")
                .border_style(border_style),
        );
    frame.render_widget(search, area);

    if focus == Focus::Search {
        let cursor_x = (input.visual_cursor().saturating_sub(scroll)) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn draw_table(frame: &mut Frame, area: Rect, snapshot: &ListingSnapshot) {
    let block = Block::bordered().title("Breweries");

    if let Some(error) = &snapshot.error {
        let message = Paragraph::new(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )))
        .block(block);
        frame.render_widget(message, area);
        return;
    }
    if snapshot.loading {
        let message = Paragraph::new(Line::from(Span::styled(
            "Loading...",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .block(block);
        frame.render_widget(message, area);
        return;
    }

    let header = Row::new(COLUMNS.iter().map(|column| {
        let mut label = column.label.to_string();
        if column.sortable && snapshot.sort_column == column.id {
            label.push_str(match snapshot.sort_order {
                SortOrder::Asc => " \u{25b2}",
                SortOrder::Desc => " \u{25bc}",
            });
        }
        header_cell(label, column.align)
    }))
    .style(Style::default().add_modifier(Modifier::BOLD));

    let first_serial = u64::from(snapshot.page.saturating_sub(1)) * u64::from(snapshot.per_page);
    let rows = snapshot.rows.iter().enumerate().map(|(index, row)| {
        Row::new(vec![
            Cell::from(Line::from((first_serial + index as u64 + 1).to_string()).right_aligned()),
            Cell::from(row.name.clone()),
            Cell::from(row.city.clone()),
            Cell::from(row.state.clone()),
            Cell::from(row.country.clone()),
            Cell::from(row.address.clone()),
        ])
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(3),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

fn header_cell(label: String, align: ColumnAlign) -> Cell<'static> {
    let line = match align {
        ColumnAlign::Left => Line::from(label),
        ColumnAlign::Right => Line::from(label).right_aligned(),
    };
    Cell::from(line)
}

fn draw_footer(frame: &mut Frame, area: Rect, snapshot: &ListingSnapshot) {
    let status = format!(
        "page {}/{}  total {}  size {}  sort {}:{}",
        snapshot.page,
        snapshot.page_count,
        snapshot.total,
        snapshot.per_page,
        snapshot.sort_column,
        snapshot.sort_order,
    );
    let footer = Line::from(vec![
        Span::raw(status),
        Span::styled(
            "   Tab focus | / search | Left/Right page | s size | n/c/y sort | q quit",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(footer), area);
}

fn draw_logs(frame: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(Block::bordered().title("Log"))
        .output_separator(' ')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(true)
        .output_file(false)
        .output_line(false)
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Green))
        .style_debug(Style::default().fg(Color::Gray));
    frame.render_widget(logs, area);
}

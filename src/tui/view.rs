//! Transaction table view
//!
//! Header with key hints, the transaction table and a summary footer.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use rust_decimal::Decimal;

use super::app::App;
use crate::display::report::truncate;
use crate::reports::Summary;

/// Render the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_table(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" budgetmgr - Transactions ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let hints = Paragraph::new("j/k:Move  d:Delete  r:Reload  q:Quit")
        .block(block)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(hints, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.rows().is_empty() {
        let text = Paragraph::new("No transactions. Add one with 'budgetmgr transaction add'.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(6),
        Constraint::Length(18),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Min(10),
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("ID").style(bold),
        Cell::from("Timestamp").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Amount").style(bold),
        Cell::from("Description").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = app
        .rows()
        .iter()
        .map(|txn| {
            let amount_style = if txn.is_expense() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };

            Row::new(vec![
                Cell::from(txn.id.map(|id| id.to_string()).unwrap_or_default()),
                Cell::from(txn.timestamp.format(&app.settings.date_format)),
                Cell::from(truncate(&txn.category, 16)),
                Cell::from(txn.amount.to_string()).style(amount_style),
                Cell::from(txn.description.clone()),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = match app.summary() {
        Ok(summary) => summary_spans(&summary),
        Err(e) => vec![Span::styled(
            format!(" {}", e),
            Style::default().fg(Color::Red),
        )],
    };

    if let Some(message) = &app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(footer, area);
}

fn summary_spans(summary: &Summary) -> Vec<Span<'static>> {
    let balance_color = if summary.balance < Decimal::ZERO {
        Color::Red
    } else {
        Color::Green
    };

    vec![
        Span::raw(" Income: "),
        Span::styled(summary.income.to_string(), Style::default().fg(Color::Green)),
        Span::raw(" │ Expenses: "),
        Span::styled(summary.expenses.to_string(), Style::default().fg(Color::Red)),
        Span::raw(" │ Balance: "),
        Span::styled(
            summary.balance.to_string(),
            Style::default()
                .fg(balance_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::config::settings::{Settings, StorageBackend};
    use crate::models::{Timestamp, Transaction};
    use crate::storage::Storage;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_table_and_footer() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, StorageBackend::Json).unwrap();
        storage
            .store()
            .save_transaction(&Transaction::new(
                Timestamp::from_ymd(2025, 1, 10).unwrap(),
                "salary",
                Decimal::from(100),
                "january pay",
            ))
            .unwrap();

        let settings = Settings::default();
        let app = App::new(&storage, &settings).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 14)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Timestamp"));
        assert!(text.contains("salary"));
        assert!(text.contains("january pay"));
        assert!(text.contains("Balance: 100"));
    }

    #[test]
    fn test_render_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, StorageBackend::Json).unwrap();
        let settings = Settings::default();
        let app = App::new(&storage, &settings).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("No transactions."));
    }
}

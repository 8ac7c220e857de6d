//! Terminal setup, main loop and drawing.

use super::app::{ListApp, chart_percentage};
use super::events::{Event, EventHandler, handle_key_event, handle_mouse_event};
use super::theme::{colors, store_color};
use crate::analytics::{BAR_MAX_WIDTH, PriceMode};
use crate::i18n::TextKey;
use crate::list::{RowView, emphasis_segments};
use crate::model::Product;
use chrono::NaiveDate;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    symbols,
    widgets::{
        Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table,
        TableState, Wrap,
    },
};
use std::io::{self, stdout};

/// Minimum terminal size for a usable layout
const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 12;

/// Columns used by a full-width history bar
const BAR_COLUMNS: usize = 30;

/// Height of the chart pane when visible
const CHART_HEIGHT: u16 = 14;

/// Run the TUI application
pub fn run_tui(app: &mut ListApp) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::default();

    loop {
        terminal.draw(|frame| render(frame, app))?;
        app.report_visible();

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Mouse(mouse) => handle_mouse_event(app, mouse),
            Event::Resize(_, _) => {}
            Event::Tick => app.tick += 1,
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Main render function
fn render(frame: &mut Frame, app: &mut ListApp) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_size_warning(frame, area);
        return;
    }

    let chart_height = if app.list.chart().is_visible() {
        CHART_HEIGHT
    } else {
        0
    };
    let [header, chart, table, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(chart_height),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header, app);
    if chart_height > 0 {
        render_chart(frame, chart, app);
    }
    render_table(frame, table, app);
    render_footer(frame, footer, app);

    if app.show_help {
        render_help(frame, area);
    }
}

fn render_size_warning(frame: &mut Frame, area: Rect) {
    let text = format!(
        "Terminal too small: {}x{} (need {MIN_WIDTH}x{MIN_HEIGHT})",
        area.width, area.height
    );
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(colors().error))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_header(frame: &mut Frame, area: Rect, app: &ListApp) {
    let scheme = colors();
    let view = app.list.view();
    let radio = |on: bool| if on { "(•)" } else { "( )" };
    let check = if view.chart_visible { "[x]" } else { "[ ]" };

    let controls = Line::from(vec![
        Span::styled(
            view.summary.clone(),
            Style::default().fg(scheme.primary).bold(),
        ),
        Span::styled("  JSON [J]  CSV [C]  ", Style::default().fg(scheme.text_muted)),
        Span::raw(format!("{check} {} ", view.chart_label)),
        Span::styled("[c]  ", Style::default().fg(scheme.text_muted)),
        Span::raw(format!(
            "{} {}  {} {} ",
            radio(view.price_mode == PriceMode::Sales),
            view.sales_price_label,
            radio(view.price_mode == PriceMode::Unit),
            view.unit_price_label,
        )),
        Span::styled("[p]", Style::default().fg(scheme.text_muted)),
    ]);

    let mut sort = vec![Span::raw(format!("{}: ", view.sort_label))];
    for option in &view.sort_options {
        let style = if option.selected {
            Style::default().fg(scheme.accent).bold()
        } else if option.disabled {
            Style::default().fg(scheme.muted).crossed_out()
        } else {
            Style::default().fg(scheme.text)
        };
        sort.push(Span::styled(option.label.clone(), style));
        sort.push(Span::raw("  "));
    }
    sort.push(Span::styled("[s]", Style::default().fg(scheme.text_muted)));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(scheme.border));
    frame.render_widget(
        Paragraph::new(vec![controls, Line::from(sort)]).block(block),
        area,
    );
}

/// Series plotted for one marked product: `(days since epoch, value)`.
fn chart_points(product: &Product, percentage: bool, mode: PriceMode) -> Vec<(f64, f64)> {
    let oldest = product.price_history.last().map_or(0.0, |entry| entry.price);
    product
        .price_history
        .iter()
        .rev()
        .map(|entry| {
            let x = (entry.date - NaiveDate::default()).num_days() as f64;
            let price = match mode {
                PriceMode::Sales => entry.price,
                PriceMode::Unit => entry.unit_price.unwrap_or(entry.price),
            };
            let y = if percentage && oldest != 0.0 {
                (entry.price - oldest) / oldest * 100.0
            } else {
                price
            };
            (x, y)
        })
        .collect()
}

fn render_chart(frame: &mut Frame, area: Rect, app: &ListApp) {
    let scheme = colors();
    let translator = app.list.translator();
    let chart = app.list.chart();
    let percentage = chart_percentage(&chart.state());
    let mode = app.list.controls().price_mode;
    let marked = chart.marked();

    let title = if percentage {
        let since = marked
            .iter()
            .filter_map(|product| product.price_history.last())
            .map(|entry| entry.date)
            .min()
            .map(|date| date.to_string())
            .unwrap_or_default();
        translator.text_with(TextKey::ChangeSince, &since)
    } else {
        translator.text(TextKey::Chart).into_owned()
    };
    let block = Block::default()
        .title(format!(" {title} [%] "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(scheme.border));

    if marked.is_empty() {
        frame.render_widget(
            Paragraph::new("Mark items with [m] to chart their price history")
                .style(Style::default().fg(scheme.text_muted))
                .block(block),
            area,
        );
        return;
    }

    let series: Vec<(String, Vec<(f64, f64)>)> = marked
        .iter()
        .map(|product| {
            let label = format!("{} {}", app.list.stores().display_name(&product.store), product.name);
            (label, chart_points(product, percentage, mode))
        })
        .collect();

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in series.iter().flat_map(|(_, points)| points) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if x_min == x_max {
        x_max = x_min + 1.0;
    }
    if y_min == y_max {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let palette = scheme.chart_palette();
    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(i, (label, points))| {
            Dataset::default()
                .name(label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(palette[i % palette.len()]))
                .data(points)
        })
        .collect();

    let date_label = |days: f64| {
        NaiveDate::default()
            .checked_add_days(chrono::Days::new(days.max(0.0) as u64))
            .map(|date| date.to_string())
            .unwrap_or_default()
    };
    let currency = translator.text(TextKey::CurrencySymbol);
    let value_label = |value: f64| {
        if percentage {
            format!("{value:.0}%")
        } else {
            format!("{currency} {value:.2}")
        }
    };

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(scheme.text_muted))
                .bounds([x_min, x_max])
                .labels(vec![date_label(x_min), date_label(x_max)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(scheme.text_muted))
                .bounds([y_min, y_max])
                .labels(vec![value_label(y_min), value_label(y_max)]),
        );
    frame.render_widget(widget, area);
}

/// Lines a row occupies in the table.
fn row_height(row: &RowView) -> u16 {
    if row.expanded {
        1 + row.bars.len() as u16
    } else {
        1
    }
}

/// Scroll so the cursor is visible and return the drawn row range.
fn fit_viewport(app: &mut ListApp, height: u16) -> std::ops::Range<usize> {
    let rows = app.list.rows();
    if rows.is_empty() {
        return 0..0;
    }
    let selected = app.selected.min(rows.len() - 1);
    let mut offset = app.offset.min(selected);

    let used = |from: usize, to: usize| -> u32 {
        rows[from..=to].iter().map(|row| u32::from(row_height(row))).sum()
    };
    while offset < selected && used(offset, selected) > u32::from(height) {
        offset += 1;
    }

    let mut end = offset;
    let mut filled = 0u32;
    while end < rows.len() {
        filled += u32::from(row_height(&rows[end]));
        if filled > u32::from(height) && end > offset {
            break;
        }
        end += 1;
    }

    app.selected = selected;
    app.offset = offset;
    app.viewport_rows = end - offset;
    offset..end
}

fn name_line(row: &RowView) -> Line<'static> {
    let scheme = colors();
    let base = if row.unavailable {
        Style::default().fg(scheme.text_muted).crossed_out()
    } else {
        Style::default().fg(scheme.text)
    };

    let mut spans = Vec::new();
    if row.chart_enabled {
        let mark = if row.chart_marked { "[x] " } else { "[ ] " };
        spans.push(Span::styled(mark, Style::default().fg(scheme.accent)));
    }
    for segment in emphasis_segments(&row.name) {
        let style = if segment.emphasized {
            base.fg(scheme.highlight).bold()
        } else {
            base
        };
        spans.push(Span::styled(segment.text, style));
    }
    if !row.quantity.is_empty() {
        spans.push(Span::styled(
            format!("  {}", row.quantity),
            Style::default().fg(scheme.text_muted),
        ));
    }
    Line::from(spans)
}

fn price_lines(row: &RowView, currency: &str) -> Vec<Line<'static>> {
    let scheme = colors();
    let mut first = vec![Span::raw(row.price.clone())];
    if let (Some(label), Some(trend)) = (row.change_label(), row.change_trend()) {
        first.push(Span::styled(
            format!(" {label}"),
            Style::default().fg(scheme.trend(trend)),
        ));
    }
    if let Some(chevron) = row.chevron() {
        first.push(Span::styled(
            format!(" {chevron}"),
            Style::default().fg(scheme.text_muted),
        ));
    }

    let mut lines = vec![Line::from(first)];
    if row.expanded {
        for bar in &row.bars {
            let columns = (bar.width as usize * BAR_COLUMNS).div_ceil(BAR_MAX_WIDTH as usize);
            let color = scheme.trend(bar.trend());
            let mut spans = vec![
                Span::styled(
                    format!("{} ", bar.date),
                    Style::default().fg(scheme.text_muted),
                ),
                Span::styled("█".repeat(columns.max(1)), Style::default().fg(color)),
                Span::raw(format!(" {currency} {:.2}", bar.price)),
            ];
            if let Some(label) = bar.change_label() {
                spans.push(Span::styled(format!(" {label}"), Style::default().fg(color)));
            }
            lines.push(Line::from(spans));
        }
    }
    lines
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut ListApp) {
    let scheme = colors();
    // Borders and header line
    let body_height = area.height.saturating_sub(3);
    let range = fit_viewport(app, body_height);
    app.visible = range.clone();

    let view = app.list.view();
    let currency = app.list.translator().text(TextKey::CurrencySymbol);

    let header = Row::new(vec![
        Cell::from(view.headers[0].clone()),
        Cell::from(view.headers[1].clone()),
        Cell::from(format!("{} {} [e]", view.headers[2], view.chevron)),
    ])
    .style(Style::default().fg(scheme.primary).bold());

    let rows: Vec<Row> = view.rows[range.clone()]
        .iter()
        .map(|row| {
            let store = Span::styled(
                row.store.clone(),
                Style::default().fg(store_color(&row.store_color)),
            );
            Row::new(vec![
                Cell::from(Line::from(store)),
                Cell::from(name_line(row)),
                Cell::from(Text::from(price_lines(row, &currency))),
            ])
            .height(row_height(row))
        })
        .collect();

    let title = format!(
        " {} / {} ",
        app.list.rows().len(),
        app.list.len()
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Percentage(50),
            Constraint::Min(24),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(scheme.border)),
    )
    .row_highlight_style(Style::default().bg(scheme.selection_bg));

    let mut state = TableState::default();
    if !range.is_empty() {
        state.select(Some(app.selected - range.start));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &mut ListApp) {
    let scheme = colors();
    let line = if let Some(input) = &app.input {
        Line::from(vec![
            Span::styled("Highlight: ", Style::default().fg(scheme.accent)),
            Span::raw(format!("{input}_")),
        ])
    } else if let Some(message) = app.status.message() {
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(scheme.accent),
        ))
    } else {
        let url = app
            .selected_row()
            .map(|row| row.url.clone())
            .filter(|url| !url.is_empty());
        Line::from(vec![
            Span::styled(
                url.unwrap_or_else(|| "? help".to_string()),
                Style::default().fg(scheme.text_muted),
            ),
            Span::styled(
                "  q quit  / highlight  y share",
                Style::default().fg(scheme.muted),
            ),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let scheme = colors();
    let keys = [
        ("j/k ↑/↓", "Move selection"),
        ("PgUp/PgDn g/G", "Page, first, last"),
        ("p", "Sales price / unit price"),
        ("s", "Next sort order"),
        ("c", "Show or hide the chart"),
        ("m, space", "Chart the selected item"),
        ("%", "Chart percentage change"),
        ("e", "Expand all price histories"),
        ("Enter", "Expand the selected history"),
        ("/", "Highlight keywords"),
        ("J / C", "Export JSON / CSV"),
        ("y", "Show the share string"),
        ("t", "Cycle theme"),
        ("q, Esc", "Quit"),
    ];
    let lines: Vec<Line> = keys
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:>14}  "), Style::default().fg(scheme.accent)),
                Span::raw(*action),
            ])
        })
        .collect();

    let width = 50.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Keys ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(scheme.primary)),
        ),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemorySink;
    use crate::list::{ItemsList, ListOptions};

    fn app_with(items: Vec<Product>) -> ListApp {
        let mut list = ItemsList::new("items", ListOptions::default());
        list.first_display();
        list.set_items(items, &());
        ListApp::with_sink(list, Box::new(MemorySink::default()))
    }

    fn products(count: usize) -> Vec<Product> {
        (0..count)
            .map(|i| {
                Product::new("billa", i.to_string(), format!("Item {i}"), 1.0 + i as f64)
                    .with_history(&[1.0 + i as f64, 1.0, 0.5])
            })
            .collect()
    }

    #[test]
    fn test_fit_viewport_scrolls_to_cursor() {
        let mut app = app_with(products(25));
        app.selected = 15;
        let range = fit_viewport(&mut app, 10);
        assert_eq!(range, 6..16);
        assert_eq!(app.viewport_rows, 10);

        app.selected = 2;
        let range = fit_viewport(&mut app, 10);
        assert_eq!(range, 2..12);
    }

    #[test]
    fn test_fit_viewport_counts_expanded_rows() {
        let mut app = app_with(products(25));
        app.list.toggle_price_histories();
        // Each expanded row takes a header line and three bars
        let range = fit_viewport(&mut app, 10);
        assert_eq!(range, 0..2);
    }

    #[test]
    fn test_fit_viewport_empty() {
        let mut app = app_with(Vec::new());
        assert_eq!(fit_viewport(&mut app, 10), 0..0);
    }

    #[test]
    fn test_chart_points_oldest_first() {
        let product = Product::new("billa", "1", "Milk", 2.0).with_history(&[2.0, 1.0]);
        assert_eq!(
            chart_points(&product, false, PriceMode::Sales),
            vec![(0.0, 1.0), (1.0, 2.0)]
        );
        assert_eq!(
            chart_points(&product, true, PriceMode::Sales),
            vec![(0.0, 0.0), (1.0, 100.0)]
        );
    }

    #[test]
    fn test_price_lines_include_bars_when_expanded() {
        let app = app_with(products(1));
        assert_eq!(price_lines(&app.list.rows()[0], "€").len(), 1);

        let mut app = app_with(products(1));
        app.list.toggle_price_histories();
        assert_eq!(price_lines(&app.list.rows()[0], "€").len(), 4);
    }
}

//! Interactive heatmap viewer for the three comparison grids.
//!
//! Renders the reconstruction, reference, and absolute-error grids as
//! switchable heatmap panes. All three share axes and shape, so switching
//! panes compares the same pixel under the cursor-free view. Rows are drawn
//! origin-low: the smallest row coordinate sits at the bottom.

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use patterndiff_engine::grid::DenseGrid;
use patterndiff_engine::model::CompareResult;
use patterndiff_engine::FieldMapping;

use crate::report::bias_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Reconstruction,
    Reference,
    AbsError,
}

impl Pane {
    fn title(&self) -> &'static str {
        match self {
            Pane::Reconstruction => "Reconstructed",
            Pane::Reference => "Reference",
            Pane::AbsError => "Absolute error",
        }
    }

    fn next(&self) -> Pane {
        match self {
            Pane::Reconstruction => Pane::Reference,
            Pane::Reference => Pane::AbsError,
            Pane::AbsError => Pane::Reconstruction,
        }
    }
}

struct ViewerApp<'a> {
    result: &'a CompareResult,
    fields: &'a FieldMapping,
    pane: Pane,
    should_quit: bool,
}

impl<'a> ViewerApp<'a> {
    fn new(result: &'a CompareResult, fields: &'a FieldMapping) -> Self {
        Self {
            result,
            fields,
            pane: Pane::Reconstruction,
            should_quit: false,
        }
    }

    fn grid(&self) -> &DenseGrid {
        let grids = &self.result.grids;
        match self.pane {
            Pane::Reconstruction => &grids.reconstruction,
            Pane::Reference => &grids.reference,
            Pane::AbsError => &grids.abs_error,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.pane = self.pane.next(),
            KeyCode::Char('1') => self.pane = Pane::Reconstruction,
            KeyCode::Char('2') => self.pane = Pane::Reference,
            KeyCode::Char('3') => self.pane = Pane::AbsError,
            _ => {}
        }
    }
}

pub fn run_viewer(result: &CompareResult, fields: &FieldMapping) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = ViewerApp::new(result, fields);
    let run_result = event_loop(&mut terminal, &mut app);

    terminal::disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    run_result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut ViewerApp<'_>,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| draw(frame, app))?;
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, app: &ViewerApp<'_>) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .split(frame.area());

    draw_tabs(frame, chunks[0], app);
    draw_heatmap(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);
}

fn draw_tabs(frame: &mut Frame, area: Rect, app: &ViewerApp<'_>) {
    let mut spans = Vec::new();
    for (i, pane) in [Pane::Reconstruction, Pane::Reference, Pane::AbsError]
        .iter()
        .enumerate()
    {
        let label = format!(" {} {} ", i + 1, pane.title());
        let style = if *pane == app.pane {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_heatmap(frame: &mut Frame, area: Rect, app: &ViewerApp<'_>) {
    let grid = app.grid();
    let range = grid.finite_min_max();

    let title = match range {
        Some((lo, hi)) => format!(" {} [{:.3} .. {:.3}] ", app.pane.title(), lo, hi),
        None => format!(" {} [no data] ", app.pane.title()),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut lines = Vec::with_capacity(inner.height as usize);
    for y in 0..inner.height {
        let mut spans = Vec::with_capacity(inner.width as usize);
        // Origin-low: terminal row 0 shows the largest row coordinate.
        let row = ((inner.height - 1 - y) as usize * grid.n_rows) / inner.height as usize;
        for x in 0..inner.width {
            let col = (x as usize * grid.n_cols) / inner.width as usize;
            let value = grid.get(row.min(grid.n_rows - 1), col.min(grid.n_cols - 1));
            spans.push(cell_span(value, range));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn cell_span(value: f64, range: Option<(f64, f64)>) -> Span<'static> {
    if !value.is_finite() {
        return Span::styled("·", Style::default().fg(Color::DarkGray));
    }
    let (lo, hi) = range.unwrap_or((0.0, 1.0));
    let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.5 };
    Span::styled(" ", Style::default().bg(ramp(t)))
}

/// Five-stop blue→cyan→green→yellow→red color ramp over [0, 1].
fn ramp(t: f64) -> Color {
    const STOPS: [(u8, u8, u8); 5] = [
        (0, 0, 160),
        (0, 200, 200),
        (0, 180, 0),
        (230, 220, 0),
        (210, 0, 0),
    ];
    let t = t.clamp(0.0, 1.0) * (STOPS.len() - 1) as f64;
    let i = (t as usize).min(STOPS.len() - 2);
    let frac = t - i as f64;
    let (r0, g0, b0) = STOPS[i];
    let (r1, g1, b1) = STOPS[i + 1];
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac) as u8;
    Color::Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &ViewerApp<'_>) {
    let s = &app.result.summary;
    let grids = &app.result.grids;
    let (row_lo, row_hi) = grids.row_bounds();
    let (col_lo, col_hi) = grids.col_bounds();

    let stats = Line::from(vec![
        Span::styled(
            format!(
                " MSE {:.4}  RMSE {:.4}  bias {:+.4} ({}) ",
                s.mse,
                s.rmse,
                s.bias,
                bias_label(s.bias)
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " {} {}..{} (rows)  {} {}..{} (cols)",
            app.fields.coord_a.trim(),
            row_lo,
            row_hi,
            app.fields.coord_b.trim(),
            col_lo,
            col_hi,
        )),
    ]);
    let help = Line::from(Span::styled(
        " Tab/1/2/3 switch grid   q quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(vec![stats, help]), area);
}

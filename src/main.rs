use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::{debug, info};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::stdout,
    time::{Duration, Instant},
};

use blockfall::cell::{BlockColor, Cell};
use blockfall::config::Config;
use blockfall::game::{Game, RandomPieceProvider};
use blockfall::grid::{GRID_HEIGHT, GRID_WIDTH};
use blockfall::input::{key_to_direction, should_quit};
use blockfall::logging;
use blockfall::square::Direction;

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";

// ============================================================================
// Color Mapping
// ============================================================================

fn block_color(color: BlockColor) -> Color {
    match color {
        BlockColor::Cyan => Color::Cyan,
        BlockColor::Gray => Color::Gray,
        BlockColor::Red => Color::Red,
        BlockColor::Green => Color::Green,
        BlockColor::Magenta => Color::Magenta,
        BlockColor::Blue => Color::Blue,
        BlockColor::Orange => Color::Rgb(255, 165, 0),
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render(frame: &mut Frame, game: &Game) {
    let area = frame.size();

    render_game(frame, game, area);
    if game.is_game_over() {
        render_game_over(frame, area);
    }
}

fn render_game(frame: &mut Frame, game: &Game, area: Rect) {
    let grid_display_width = (GRID_WIDTH as u16 * CELL_WIDTH) + 2;
    let grid_display_height = GRID_HEIGHT as u16 + 2;

    let main_area = centered_rect(grid_display_width, grid_display_height + 2, area);
    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);

    render_grid(frame, game, vertical[0]);

    let controls = Paragraph::new(vec![Line::from("←→: Move | ↓: Rotate | Space: Drop | Q/ESC: Quit")])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    let controls_area = Rect {
        x: area.x,
        y: vertical[1].y,
        width: area.width,
        height: vertical[1].height.min(1),
    };
    frame.render_widget(controls, controls_area);
}

fn render_grid(frame: &mut Frame, game: &Game, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Blockfall ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = game
        .render_grid()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => Span::raw(EMPTY_CHAR),
                    Cell::Filled(color) => {
                        Span::styled(BLOCK_CHAR, Style::default().fg(block_color(*color)))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_game_over(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled(
            "Press Q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(paragraph, centered_rect(24, 7, area));
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

// ============================================================================
// Main Loop
// ============================================================================

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(&config.log_file, config.log_level())?;
    info!("starting with {:?}", config);

    enable_raw_mode().context("failed to enable raw mode")?;
    stdout()
        .execute(EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let result = run(&config);

    // Always try to restore the terminal.
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);

    result
}

fn run(config: &Config) -> Result<()> {
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let provider = match config.seed {
        Some(seed) => RandomPieceProvider::seeded(seed),
        None => RandomPieceProvider::from_entropy(),
    };
    let mut game = Game::with_provider(Box::new(provider));
    let tick_duration = Duration::from_millis(config.tick_ms);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| render(frame, &game))?;

        for game_event in game.take_events() {
            debug!("{:?}", game_event);
        }

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if should_quit(key) {
                    info!("quit requested");
                    break;
                }
                if key.kind == KeyEventKind::Press && !game.is_game_over() {
                    if let Some(direction) = key_to_direction(key.code) {
                        game.handle(direction);
                    }
                }
            }
        }

        // Gravity stops once the game is over; the board stays on screen.
        if last_tick.elapsed() >= tick_duration {
            if !game.is_game_over() {
                game.handle(Direction::Down);
            }
            last_tick = Instant::now();
        }
    }

    Ok(())
}

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::controls::{ControlButton, ControlPad};
use crate::game::{CollisionType, Direction, GameState, Position};
use crate::metrics::GameMetrics;

const HEAD_COLOR: Color = Color::Rgb(0x7e, 0x40, 0xb1);
const FOOD_COLOR: Color = Color::Rgb(0xb1, 0x8c, 0xff);
const BOARD_COLOR: Color = Color::Rgb(0xff, 0xe0, 0xec);
const ACCENT_COLOR: Color = Color::Rgb(0xff, 0x6f, 0xa8);

const BUTTON_ORDER: [ControlButton; 5] = [
    ControlButton::Steer(Direction::Up),
    ControlButton::Steer(Direction::Down),
    ControlButton::Steer(Direction::Left),
    ControlButton::Steer(Direction::Right),
    ControlButton::Restart,
];

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Paint one frame and record where the control buttons ended up
    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        pad: &mut ControlPad,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Key help
                Constraint::Length(1), // Control pad
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Two terminal columns per cell keeps tiles roughly square
        let board_area = centered(
            chunks[1],
            (state.grid_width as u16).saturating_mul(2).saturating_add(2),
            (state.grid_height as u16).saturating_add(2),
        );
        let grid = self.render_grid(state);
        frame.render_widget(grid, board_area);

        if let Some(collision) = state.collision() {
            let overlay_area = centered(board_area, 34, 9);
            frame.render_widget(Clear, overlay_area);
            let game_over = self.render_game_over(state, metrics, collision);
            frame.render_widget(game_over, overlay_area);
        }

        // Render footer with controls
        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);

        self.render_control_pad(frame, chunks[3], pad);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        head_glyph(state.active_direction()),
                        Style::default()
                            .fg(HEAD_COLOR)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if let Some(index) = state.snake.body.iter().position(|p| *p == pos) {
                    Span::styled("■ ", Style::default().fg(body_color(index)))
                } else if pos == state.food {
                    Span::styled(
                        "♥ ",
                        Style::default().fg(FOOD_COLOR).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(BOARD_COLOR))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_COLOR))
                .title(" Snake ♥ "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", state.tick_interval_ms), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_game_over(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        collision: CollisionType,
    ) -> Paragraph<'_> {
        let cause = match collision {
            CollisionType::Wall => "You hit the wall",
            CollisionType::SelfCollision => "You bit yourself",
        };

        let record_line = if metrics.new_record {
            Line::from(Span::styled(
                "New high score!",
                Style::default()
                    .fg(ACCENT_COLOR)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            ])
        };

        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            record_line,
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / drag to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_control_pad(&self, frame: &mut Frame, area: Rect, pad: &mut ControlPad) {
        pad.clear();

        let widths: Vec<u16> = BUTTON_ORDER
            .iter()
            .map(|button| button.label().chars().count() as u16 + 2)
            .collect();
        let total = widths.iter().sum::<u16>() + (widths.len() as u16 - 1);
        if total > area.width || area.height == 0 {
            return;
        }

        let mut x = area.x + (area.width - total) / 2;
        for (button, width) in BUTTON_ORDER.iter().zip(widths) {
            let rect = Rect::new(x, area.y, width, 1);
            let style = match button {
                ControlButton::Restart => Style::default().fg(Color::White).bg(ACCENT_COLOR),
                ControlButton::Steer(_) => Style::default().fg(Color::White).bg(HEAD_COLOR),
            };
            frame.render_widget(
                Paragraph::new(format!(" {} ", button.label())).style(style),
                rect,
            );
            pad.register(rect, *button);
            x += width + 1;
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

/// Purple that fades towards the tail
fn body_color(index: usize) -> Color {
    let fade = (index.min(20) * 6) as u8;
    Color::Rgb(
        0x9b_u8.saturating_add(fade),
        0x59_u8.saturating_add(fade),
        0xd0_u8.saturating_add(fade / 2),
    )
}

/// A `width` x `height` rect centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

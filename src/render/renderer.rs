use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CollisionType, GameConfig, GameState, GameStatus, SnakeGrid};
use crate::grid::{GameGrid, Glyph, Location};
use crate::metrics::GameMetrics;

const EMPTY_CELL: &str = ". ";

/// Glyph per cell, row by row; actors later in the scene paint over earlier
/// ones and invisible actors are skipped.
pub fn paint_cells<K: Copy + PartialEq + 'static>(grid: &GameGrid<K>) -> Vec<Vec<Option<Glyph>>> {
    let width = grid.nb_horz_cells() as usize;
    let height = grid.nb_vert_cells() as usize;
    let mut cells = vec![vec![None; width]; height];

    for (_, actor) in grid.actors() {
        let location = actor.location();
        if !grid.is_in_grid(location) {
            continue;
        }
        if let Some(glyph) = actor.glyph() {
            cells[location.y as usize][location.x as usize] = Some(glyph.clone());
        }
    }
    cells
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        config: &GameConfig,
        metrics: &GameMetrics,
    ) {
        let chunks = Self::layout(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let title = self.render_title(&state.grid);
        frame.render_widget(title, chunks[1]);

        let game_area = Self::centered(chunks[2]);
        match state.status {
            GameStatus::Running => {
                let grid = self.render_grid(&state.grid, config.wall_inset, " Snake ");
                frame.render_widget(grid, game_area);
            }
            status => {
                let game_over = self.render_game_over(state, status);
                frame.render_widget(game_over, game_area);
            }
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[3]);
    }

    /// Draws a grid driven by actor behaviours alone
    pub fn render_demo(&self, frame: &mut Frame, grid: &SnakeGrid, metrics: &GameMetrics) {
        let chunks = Self::layout(frame.area());

        let stats = Paragraph::new(Line::from(vec![
            Span::styled("Demo ", Style::default().fg(Color::Yellow)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(stats, chunks[0]);

        frame.render_widget(self.render_title(grid), chunks[1]);

        let game_area = Self::centered(chunks[2]);
        frame.render_widget(self.render_grid(grid, 0, " Demo "), game_area);

        let controls = Paragraph::new(Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("N", Style::default().fg(Color::Cyan)),
            Span::raw(" step | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(controls, chunks[3]);
    }

    fn layout(area: Rect) -> std::rc::Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(2), // Title line
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(area)
    }

    /// Center the game grid horizontally
    fn centered(area: Rect) -> Rect {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(area)[1]
    }

    fn render_grid<K: Copy + PartialEq + 'static>(
        &self,
        grid: &GameGrid<K>,
        wall_inset: i32,
        name: &'static str,
    ) -> Paragraph<'static> {
        let lines: Vec<Line> = paint_cells(grid)
            .into_iter()
            .enumerate()
            .map(|(y, row)| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .enumerate()
                    .map(|(x, cell)| {
                        let location = Location::new(x as i32, y as i32);
                        match cell {
                            Some(glyph) => Span::styled(
                                glyph.symbol,
                                Style::default().fg(glyph.color).add_modifier(Modifier::BOLD),
                            ),
                            None if Self::is_wall(grid, wall_inset, location) => {
                                Span::styled("▓▓", Style::default().fg(Color::Gray))
                            }
                            // Empty cell
                            None => Span::styled(EMPTY_CELL, Style::default().fg(Color::DarkGray)),
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(name);
        if grid.is_paused() {
            block = block.title_bottom(Line::from(" PAUSED ").centered());
        }

        Paragraph::new(lines).block(block).alignment(Alignment::Center)
    }

    fn is_wall<K: Copy + PartialEq + 'static>(grid: &GameGrid<K>, inset: i32, location: Location) -> bool {
        location.x < inset
            || location.y < inset
            || location.x >= grid.nb_horz_cells() - inset
            || location.y >= grid.nb_vert_cells() - inset
    }

    fn render_title<K: Copy + PartialEq + 'static>(&self, grid: &GameGrid<K>) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            grid.title().to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Food: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.foods_eaten.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}%", state.speed_percent),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, status: GameStatus) -> Paragraph<'static> {
        let (headline, reason, color) = match status {
            GameStatus::Won => ("YOU WIN", "the board is full", Color::Green),
            GameStatus::Over(CollisionType::Wall) => ("GAME OVER", "hit the wall", Color::Red),
            GameStatus::Over(CollisionType::SelfCollision) => {
                ("GAME OVER", "bit your own tail", Color::Red)
            }
            GameStatus::Running => ("", "", Color::White),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
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
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
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
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" pause | "),
                Span::styled("N", Style::default().fg(Color::Cyan)),
                Span::raw(" step | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" restart"),
            ]),
            Line::from(vec![
                Span::styled("C", Style::default().fg(Color::Magenta)),
                Span::raw(" colour | "),
                Span::styled("T", Style::default().fg(Color::Magenta)),
                Span::raw(" auto colour | "),
                Span::styled("+/-", Style::default().fg(Color::Magenta)),
                Span::raw(" level | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameEngine, Piece};
    use crate::grid::{Actor, SpriteStore};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_later_actors_paint_on_top() {
        let mut grid = SnakeGrid::new(3, 2).unwrap();
        let mut store = SpriteStore::default();
        let apple = store.get("sprites/apple.png", false).unwrap();
        let mouse = store.get("sprites/mouse.png", false).unwrap();

        grid.add_actor(Actor::new(Piece::Food, vec![apple.clone()]), Location::new(1, 0));
        grid.add_actor(Actor::new(Piece::Food, vec![mouse]), Location::new(1, 0));
        let hidden = grid.add_actor(Actor::new(Piece::Food, vec![apple]), Location::new(2, 1));
        grid.actor_mut(hidden).unwrap().set_visible(false);

        let cells = paint_cells(&grid);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].len(), 3);
        assert_eq!(cells[0][1].as_ref().unwrap().symbol, "m ");
        assert!(cells[1][2].is_none());
        assert!(cells[0][0].is_none());
    }

    #[test]
    fn test_render_game_and_game_over() {
        let config = GameConfig::default();
        let mut engine = GameEngine::new(config.clone());
        let mut state = engine.reset().unwrap();
        let metrics = GameMetrics::new();
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &state, &config, &metrics))
            .unwrap();

        state.status = GameStatus::Over(CollisionType::Wall);
        terminal
            .draw(|frame| renderer.render(frame, &state, &config, &metrics))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("hit the wall"));
    }
}

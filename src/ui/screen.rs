use super::name::NameField;
use crate::consts;
use crate::engine::{Cell, Direction, Grid, LoopState, Notice, View};
use crate::scores::LeaderboardStatus;
use crate::util::{center_rect, truncate_to_width};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect, Size},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Number of terminal lines for showing notices
const NOTICE_LINES: u16 = 2;

/// Everything drawn on the terminal in one frame
#[derive(Clone, Copy, Debug)]
pub(super) struct Screen<'a> {
    pub(super) view: &'a View<'a>,
    pub(super) name: &'a NameField,
    pub(super) notice: Option<&'a Notice>,
}

impl Screen<'_> {
    /// The size of the area needed to draw a game on `grid`
    pub(super) fn size(grid: Grid) -> Size {
        Size {
            width: board_width(grid).saturating_add(consts::SIDEBAR_WIDTH),
            height: grid
                .rows
                .saturating_add(2)
                .saturating_add(NOTICE_LINES)
                .saturating_add(3),
        }
    }

    fn render_score_bar(&self, area: Rect, buf: &mut Buffer) {
        let text = match self.view.session {
            Some(session) => format!(" Score: {}  Player: {}", session.score(), session.player()),
            None => String::from(" Score: 0"),
        };
        Line::styled(text, consts::SCORE_BAR_STYLE).render(area, buf);
    }

    fn render_board(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered();
        let inner = block.inner(area);
        block.render(area, buf);
        let Some(session) = self.view.session else {
            return;
        };
        let mut canvas = Canvas { area: inner, buf };
        let snake = session.snake();
        for &cell in snake.tail() {
            canvas.draw_cell(cell, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        for &cell in session.food() {
            canvas.draw_cell(cell, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if matches!(self.view.state, LoopState::Halted(_)) {
            canvas.draw_cell(
                snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            canvas.draw_cell(snake.head(), head_symbol(snake.heading()), consts::SNAKE_STYLE);
        }
    }

    fn render_ranking(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(" Ranking ");
        let inner = block.inner(area);
        block.render(area, buf);
        let width = usize::from(inner.width);
        let leaderboard = self.view.leaderboard;
        let mut lines = leaderboard
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let rank = format!("{:>2}. ", i + 1);
                let score = format!(" - {}", entry.score);
                let room = width.saturating_sub(rank.width() + score.width());
                Line::from(format!(
                    "{rank}{}{score}",
                    truncate_to_width(&entry.player_name, room)
                ))
            })
            .collect::<Vec<_>>();
        match (leaderboard.status(), lines.is_empty()) {
            (LeaderboardStatus::Loading, true) => lines.push(Line::from(" Loading…")),
            (LeaderboardStatus::Ready, true) => lines.push(Line::from(" No scores yet")),
            (LeaderboardStatus::Unavailable, true) => {
                lines.push(Line::styled(" Unavailable", consts::PROBLEM_STYLE));
            }
            (LeaderboardStatus::Unavailable, false) => {
                lines.push(Line::default());
                lines.push(Line::styled(" (out of date)", consts::PROBLEM_STYLE));
            }
            _ => (),
        }
        Text::from(lines).render(inner, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        match self.view.state {
            LoopState::Idle => {
                let name = self.name.as_str();
                let padding = " ".repeat(consts::MAX_NAME_LENGTH.saturating_sub(name.width()));
                Line::from_iter([
                    Span::raw(" Name: "),
                    Span::styled(format!("{name}{padding}"), consts::NAME_FIELD_STYLE),
                ])
                .render(area, buf);
            }
            LoopState::Running => (),
            LoopState::Halted(_) => Span::from(" — GAME OVER —").render(area, buf),
        }
    }

    fn render_notice(&self, area: Rect, buf: &mut Buffer) {
        let Some(notice) = self.notice else {
            return;
        };
        let style = if notice.is_problem() {
            consts::PROBLEM_STYLE
        } else {
            consts::NOTICE_STYLE
        };
        let text = notice.to_string();
        let opts = textwrap::Options::new(usize::from(area.width).max(2))
            .break_words(true)
            .initial_indent(" ")
            .subsequent_indent(" ");
        Text::from_iter(
            textwrap::wrap(&text, opts)
                .into_iter()
                .take(usize::from(NOTICE_LINES))
                .map(|ln| Line::styled(ln.into_owned(), style)),
        )
        .render(area, buf);
    }

    fn render_hints(&self, area: Rect, buf: &mut Buffer) {
        let hints: &[(&str, &str)] = match self.view.state {
            LoopState::Idle | LoopState::Halted(_) if self.view.awaiting_ranking => {
                Span::from(" Waiting for the leaderboard to refresh…").render(area, buf);
                return;
            }
            LoopState::Idle => &[("Start", "Enter"), ("Quit", "Esc")],
            LoopState::Running => &[("Steer", "←↑↓→"), ("Quit", "Ctrl-C")],
            LoopState::Halted(_) => &[
                ("Play again", "Enter"),
                ("Change name", "Esc"),
                ("Quit", "Ctrl-C"),
            ],
        };
        let mut spans = Vec::new();
        for (i, &(label, key)) in hints.iter().enumerate() {
            spans.push(Span::raw(if i == 0 { " " } else { " — " }));
            spans.push(Span::raw(label));
            spans.push(Span::raw(" ("));
            spans.push(Span::styled(key, consts::KEY_STYLE));
            spans.push(Span::raw(")"));
        }
        Line::from(spans).render(area, buf);
    }
}

impl Widget for Screen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid = self.view.grid;
        let display = center_rect(area, Screen::size(grid));
        let [score_area, main_area, status_area, notice_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(grid.rows.saturating_add(2)),
            Constraint::Length(1),
            Constraint::Length(NOTICE_LINES),
            Constraint::Length(1),
        ])
        .areas(display);
        let [board_area, ranking_area] = Layout::horizontal([
            Constraint::Length(board_width(grid)),
            Constraint::Length(consts::SIDEBAR_WIDTH),
        ])
        .areas(main_area);
        self.render_score_bar(score_area, buf);
        self.render_board(board_area, buf);
        self.render_ranking(ranking_area, buf);
        self.render_status(status_area, buf);
        self.render_notice(notice_area, buf);
        self.render_hints(hint_area, buf);
    }
}

/// Width of the bordered board for `grid`
fn board_width(grid: Grid) -> u16 {
    grid.columns
        .saturating_mul(consts::CELL_WIDTH)
        .saturating_add(2)
}

fn head_symbol(heading: Direction) -> char {
    match heading {
        Direction::Up => consts::SNAKE_HEAD_NORTH_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_SOUTH_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_WEST_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_EAST_SYMBOL,
    }
}

/// The inside of the board, addressed in grid cells
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let (Ok(col), Ok(row)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            return;
        };
        let Some(x) = col
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|dx| self.area.x.checked_add(dx))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        if !self.area.contains(Position { x, y }) {
            return;
        }
        if let Some(c) = self.buf.cell_mut((x, y)) {
            c.set_char(symbol);
            c.set_style(Style::reset().patch(style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Collision, Session};
    use crate::scores::protocol::LeaderboardEntry;
    use crate::scores::Leaderboard;
    use pretty_assertions::assert_eq;
    use ratatui::style::{Color, Modifier};

    const GRID: Grid = Grid {
        columns: 6,
        rows: 4,
    };

    fn rows(buf: &Buffer) -> Vec<String> {
        buf.content
            .chunks(usize::from(buf.area.width))
            .map(|row| {
                row.iter()
                    .map(ratatui::buffer::Cell::symbol)
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }

    fn draw(screen: Screen<'_>) -> Buffer {
        let size = Screen::size(GRID);
        let area = Rect::new(0, 0, size.width, size.height);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);
        buf
    }

    fn leaderboard(entries: &[(&str, u32)]) -> Leaderboard {
        let mut lb = Leaderboard::default();
        lb.update(
            entries
                .iter()
                .map(|&(name, score)| LeaderboardEntry {
                    player_name: name.to_owned(),
                    score,
                })
                .collect(),
        );
        lb
    }

    #[test]
    fn size() {
        assert_eq!(
            Screen::size(consts::GRID),
            Size {
                width: 86,
                height: 32
            }
        );
    }

    #[test]
    fn idle() {
        let lb = leaderboard(&[("alice", 300), ("bob", 0)]);
        let view = View {
            grid: GRID,
            state: LoopState::Idle,
            session: None,
            leaderboard: &lb,
            awaiting_ranking: false,
        };
        let name = NameField::new(Some(String::from("carol")));
        let buf = draw(Screen {
            view: &view,
            name: &name,
            notice: None,
        });
        assert_eq!(
            rows(&buf),
            [
                " Score: 0",
                "┌────────────┐┌ Ranking ───────────────┐",
                "│            ││ 1. alice - 300         │",
                "│            ││ 2. bob - 0             │",
                "│            ││                        │",
                "│            ││                        │",
                "└────────────┘└────────────────────────┘",
                " Name: carol",
                "",
                "",
                " Start (Enter) — Quit (Esc)",
            ]
        );
        assert!(buf[(0, 0)].modifier.contains(Modifier::REVERSED));
        assert!(buf[(39, 0)].modifier.contains(Modifier::REVERSED));
        assert_eq!(buf[(7, 7)].modifier, Modifier::UNDERLINED);
    }

    #[test]
    fn halted() {
        let lb = Leaderboard::default();
        let mut lb_unavailable = lb.clone();
        lb_unavailable.mark_unavailable();
        let session = Session::for_display(
            "alice",
            vec![Cell::new(3, 1), Cell::new(2, 1), Cell::new(1, 1)],
            Direction::Right,
            vec![Cell::new(5, 3)],
            200,
        );
        let view = View {
            grid: GRID,
            state: LoopState::Halted(Collision::Wall),
            session: Some(&session),
            leaderboard: &lb_unavailable,
            awaiting_ranking: false,
        };
        let notice = Notice::GameOver {
            score: 200,
            collision: Collision::Wall,
        };
        let name = NameField::new(Some(String::from("alice")));
        let buf = draw(Screen {
            view: &view,
            name: &name,
            notice: Some(&notice),
        });
        let rows = rows(&buf);
        assert_eq!(
            rows[..8],
            [
                " Score: 200  Player: alice",
                "┌────────────┐┌ Ranking ───────────────┐",
                "│            ││ Unavailable            │",
                "│  ⚬ ⚬ ×     ││                        │",
                "│            ││                        │",
                "│          ● ││                        │",
                "└────────────┘└────────────────────────┘",
                " — GAME OVER —",
            ]
        );
        assert!(rows[8].starts_with(" Game over! The snake hit the wall."));
        assert!(rows[10].starts_with(" Play again (Enter)"));
        assert_eq!(buf[(7, 3)].fg, Color::LightRed);
        assert_eq!(buf[(7, 3)].modifier, Modifier::REVERSED);
        assert_eq!(buf[(5, 3)].fg, Color::Green);
        assert_eq!(buf[(11, 5)].fg, Color::LightRed);
        assert_eq!(buf[(11, 5)].modifier, Modifier::empty());
    }

    #[test]
    fn running_head_faces_heading() {
        let lb = leaderboard(&[]);
        let session = Session::for_display(
            "bob",
            vec![Cell::new(0, 0), Cell::new(0, 1)],
            Direction::Up,
            Vec::new(),
            0,
        );
        let view = View {
            grid: GRID,
            state: LoopState::Running,
            session: Some(&session),
            leaderboard: &lb,
            awaiting_ranking: false,
        };
        let name = NameField::default();
        let rows = rows(&draw(Screen {
            view: &view,
            name: &name,
            notice: None,
        }));
        assert_eq!(rows[2], "│v           ││ No scores yet          │");
        assert_eq!(rows[3], "│⚬           ││                        │");
        assert_eq!(rows[7], "");
        assert!(rows[10].starts_with(" Steer (←↑↓→)"));
    }

    #[test]
    fn long_names_are_truncated() {
        let lb = leaderboard(&[("abcdefghijklmnop", 1_000_000)]);
        let view = View {
            grid: GRID,
            state: LoopState::Idle,
            session: None,
            leaderboard: &lb,
            awaiting_ranking: true,
        };
        let name = NameField::default();
        let rows = rows(&draw(Screen {
            view: &view,
            name: &name,
            notice: Some(&Notice::NameRequired),
        }));
        assert_eq!(rows[2], "│            ││ 1. abcdefghi… - 1000000│");
        assert_eq!(rows[8], " Please enter a player name.");
        assert_eq!(rows[10], " Waiting for the leaderboard to refresh…");
    }
}

use crate::command::Command;
use crate::consts;
use crate::engine::{GameLoop, LoopState};
use crate::scores::{ScoreEvent, Scoreboard};
use crate::ui::TerminalPresenter;
use crossterm::event::{poll, read, Event, KeyEvent};
use ratatui::backend::Backend;
use std::io;
use std::sync::mpsc::Receiver;
use std::time::Instant;
use tracing::debug;

/// Drives the game: waits for input or for the next frame, hands score
/// server outcomes to the game loop, and runs frames while a game is on.
#[derive(Debug)]
pub(crate) struct App<S, B: Backend> {
    game: GameLoop<S>,
    presenter: TerminalPresenter<B>,
    events: Receiver<ScoreEvent>,

    /// When the next frame should run.  `None` when no game is running, in
    /// which case frames are not scheduled at all.
    next_frame: Option<Instant>,

    quitting: bool,
}

impl<S: Scoreboard, B: Backend> App<S, B> {
    pub(crate) fn new(
        game: GameLoop<S>,
        presenter: TerminalPresenter<B>,
        events: Receiver<ScoreEvent>,
    ) -> Self {
        App {
            game,
            presenter,
            events,
            next_frame: None,
            quitting: false,
        }
    }

    pub(crate) fn run(mut self) -> io::Result<()> {
        self.game.render(&mut self.presenter)?;
        while !self.quitting {
            let timeout = self.next_frame.map_or(consts::IDLE_POLL_PERIOD, |when| {
                when.saturating_duration_since(Instant::now())
            });
            if poll(timeout)? {
                self.handle_event(read()?)?;
            }
            self.drain_score_events()?;
            if self.next_frame.is_some_and(|when| Instant::now() >= when) {
                self.run_frame(Instant::now())?;
            }
        }
        Ok(())
    }

    /// Run one frame of the game and schedule the next one if the game is
    /// still going
    fn run_frame(&mut self, now: Instant) -> io::Result<()> {
        let outcome = self.game.frame(now, &mut self.presenter)?;
        self.next_frame = outcome.rearm().then(|| now + consts::FRAME_PERIOD);
        Ok(())
    }

    fn drain_score_events(&mut self) -> io::Result<()> {
        let mut received = false;
        while let Ok(event) = self.events.try_recv() {
            self.game.handle_score_event(event, &mut self.presenter);
            received = true;
        }
        if received {
            self.game.render(&mut self.presenter)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        if matches!(event, Event::Resize(..)) {
            return self.game.render(&mut self.presenter);
        }
        match event.as_key_press_event() {
            Some(ev) => self.handle_key(ev),
            None => Ok(()),
        }
    }

    fn handle_key(&mut self, ev: KeyEvent) -> io::Result<()> {
        if self.game.running() {
            let cmd = Command::from_key_event(ev);
            if cmd == Some(Command::Quit) {
                self.quitting = true;
            } else if let Some(direction) = cmd.and_then(Command::direction) {
                self.game.steer(direction);
            }
            return Ok(());
        }
        let Some(cmd) = Command::from_text_key_event(ev) else {
            return Ok(());
        };
        match (cmd, self.game.state()) {
            (Command::Quit, _) | (Command::Esc, LoopState::Idle) => {
                self.quitting = true;
                return Ok(());
            }
            (Command::Enter, _) => return self.start(),
            (Command::Esc, _) => self.back_to_idle(),
            (Command::Backspace, _) => {
                self.back_to_idle();
                self.presenter.name_mut().backspace();
            }
            (Command::Char(c), _) => {
                self.back_to_idle();
                self.presenter.name_mut().push(c);
            }
            _ => (),
        }
        self.game.render(&mut self.presenter)
    }

    fn back_to_idle(&mut self) {
        if matches!(self.game.state(), LoopState::Halted(_)) {
            self.game.reset();
            self.presenter.clear_notice();
        }
    }

    /// Start a new game with the name in the name field, replacing any game
    /// that has just ended
    fn start(&mut self) -> io::Result<()> {
        if self.game.view().awaiting_ranking {
            debug!("Not starting new game until leaderboard is refreshed");
            return Ok(());
        }
        self.game.reset();
        let name = self.presenter.name().as_str().to_owned();
        match self.game.start(&name, &mut self.presenter) {
            Ok(()) => {
                self.presenter.clear_notice();
                self.next_frame = Some(Instant::now());
            }
            Err(e) => debug!(error = %e, "Could not start game"),
        }
        self.game.render(&mut self.presenter)
    }
}

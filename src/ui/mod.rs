//! Drawing the game in the terminal
mod name;
mod screen;
pub(crate) use self::name::NameField;
use self::screen::Screen;
use crate::engine::{Notice, Presenter, View};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// A [`Presenter`] that draws on a terminal through ratatui.  Also holds the
/// UI-only state: the player name being typed and the latest notice.
#[derive(Debug)]
pub(crate) struct TerminalPresenter<B: Backend> {
    terminal: Terminal<B>,
    name: NameField,
    notice: Option<Notice>,
}

impl<B: Backend> TerminalPresenter<B> {
    pub(crate) fn new(terminal: Terminal<B>, name: NameField) -> Self {
        TerminalPresenter {
            terminal,
            name,
            notice: None,
        }
    }

    pub(crate) fn name(&self) -> &NameField {
        &self.name
    }

    pub(crate) fn name_mut(&mut self) -> &mut NameField {
        &mut self.name
    }

    pub(crate) fn clear_notice(&mut self) {
        self.notice = None;
    }
}

impl<B: Backend> Presenter for TerminalPresenter<B> {
    fn render(&mut self, view: &View<'_>) -> io::Result<()> {
        let screen = Screen {
            view,
            name: &self.name,
            notice: self.notice.as_ref(),
        };
        self.terminal
            .draw(|frame| frame.render_widget(screen, frame.area()))?;
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}

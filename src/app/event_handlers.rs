use std::io::Write;

use crossterm::event::KeyEvent;

use super::{App, LoopState};
use crate::app::binds::{DisplayAction, action_for_key};
use crate::app::config::{HorizontalAlign, VerticalAlign};
use crate::app::input::InputEvent;
use crate::app::ui::clear_screen;

/// Trait for event handling
pub trait EventHandlers {
    fn on_input<W: Write>(&mut self, out: &mut W, event: InputEvent);
    fn on_key_event<W: Write>(&mut self, out: &mut W, key: KeyEvent);
    fn reset_screen<W: Write>(&mut self, out: &mut W);
    fn quit(&mut self);
}

impl<S, A> EventHandlers for App<S, A> {
    fn on_input<W: Write>(&mut self, out: &mut W, event: InputEvent) {
        match event {
            InputEvent::Key(key) => self.on_key_event(out, key),
            InputEvent::Resize(width, height) => {
                log::debug!("Terminal resized to {}x{}", width, height);
                self.reset_screen(out);
            }
        }
    }

    /// Apply a key press to the alignment state
    fn on_key_event<W: Write>(&mut self, out: &mut W, key: KeyEvent) {
        let Some(action) = action_for_key(&key) else {
            return;
        };

        match action {
            DisplayAction::Quit => {
                crate::app::logging::log_user_interaction("quit", None);
                self.quit();
                return;
            }
            DisplayAction::AlignTop => self.display.vertical = VerticalAlign::Top,
            DisplayAction::AlignBottom => self.display.vertical = VerticalAlign::Bottom,
            DisplayAction::AlignLeft => self.display.horizontal = HorizontalAlign::Left,
            DisplayAction::AlignRight => self.display.horizontal = HorizontalAlign::Right,
            DisplayAction::Center => self.display.center(),
        }

        crate::app::logging::log_user_interaction(
            "align",
            Some(&format!(
                "{:?}/{:?}",
                self.display.horizontal, self.display.vertical
            )),
        );
        self.reset_screen(out);
    }

    /// Clear the old frame and force the artwork to be drawn again at the new origin
    fn reset_screen<W: Write>(&mut self, out: &mut W) {
        self.art_cache.invalidate();
        if let Err(e) = clear_screen(out) {
            log::warn!("Failed to clear screen: {}", e);
        }
    }

    /// Set the loop state to terminating to quit the application.
    fn quit(&mut self) {
        self.state = LoopState::Terminating;
    }
}

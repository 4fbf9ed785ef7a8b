use std::io;
use std::thread::{self, JoinHandle};

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::UnboundedSender;

/// Terminal input forwarded to the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

impl InputEvent {
    fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            Event::Resize(width, height) => Some(Self::Resize(width, height)),
            _ => None,
        }
    }
}

/// Start the background thread that blocks on terminal input.
///
/// The thread only sends; it stops once the receiver is gone or reading
/// fails, and is never joined.
pub fn spawn_input_producer(tx: UnboundedSender<InputEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            loop {
                match crossterm::event::read() {
                    Ok(event) => {
                        if let Some(event) = InputEvent::from_terminal(event)
                            && tx.send(event).is_err()
                        {
                            break;
                        }
                    }
                    Err(e) => {
                        log::error!("Failed to read terminal input: {}", e);
                        break;
                    }
                }
            }
            log::debug!("Input producer stopped");
        })
}

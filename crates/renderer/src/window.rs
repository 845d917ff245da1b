//! Window shell around `minifb`.
//!
//! The shell owns the OS window, presents finished [`Surface`] frames, and
//! exposes the small amount of input the deck reacts to: pointer position,
//! escape to quit, `T` to toggle the theme, and `N` to skip to the next
//! section.

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::surface::Surface;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("failed to open window: {0}")]
    WindowInit(String),
    #[error("failed to present frame: {0}")]
    WindowUpdate(String),
}

pub struct Shell {
    window: Window,
}

impl Shell {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, ShellError> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|err| ShellError::WindowInit(err.to_string()))?;
        Ok(Self { window })
    }

    /// Pushes the finished frame to the screen.
    pub fn present(&mut self, surface: &Surface) -> Result<(), ShellError> {
        self.window
            .update_with_buffer(surface.pixels(), surface.width(), surface.height())
            .map_err(|err| ShellError::WindowUpdate(err.to_string()))
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn escape_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Edge-triggered theme toggle request.
    pub fn theme_toggle_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::T, KeyRepeat::No)
    }

    /// Edge-triggered request to skip to the next section.
    pub fn skip_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::N, KeyRepeat::No)
    }

    /// Pointer position in window pixels; `None` while the pointer is
    /// outside the window.
    pub fn pointer(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }
}

/// Enter/leave transition reported by [`PointerState::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTransition {
    Entered,
    Left,
    None,
}

/// Tracks the last pointer sample and reports region transitions.
#[derive(Debug, Default)]
pub struct PointerState {
    position: Option<(f32, f32)>,
}

impl PointerState {
    pub fn update(&mut self, sample: Option<(f32, f32)>) -> PointerTransition {
        let transition = match (self.position.is_some(), sample.is_some()) {
            (false, true) => PointerTransition::Entered,
            (true, false) => PointerTransition::Left,
            _ => PointerTransition::None,
        };
        self.position = sample;
        transition
    }

    pub fn position(&self) -> Option<(f32, f32)> {
        self.position
    }
}

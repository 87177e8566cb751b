//! Input events and the subscriptions the tool holds on them
//!
//! The host delivers events by calling [`crate::LassoTool::handle_input`]. What the
//! tool listens to is made explicit through [`InputSubscription`] handles taken at
//! construction and cancelled on dispose, so the tool's lifetime bounds its input
//! footprint.

use lassoview_core::ScreenPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A button press or release at a position local to the overlay surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: ScreenPoint,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn primary(x: f32, y: f32) -> Self {
        Self {
            position: ScreenPoint::new(x, y),
            button: PointerButton::Primary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(ScreenPoint),
    PointerUp(PointerEvent),
    Key(Key),
    /// The render surface changed size or position
    Resize,
}

/// Whether the tool used an event; hosts forward ignored events elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Consumed,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputChannel {
    Pointer,
    Keyboard,
}

/// Where subscriptions are registered, typically the host window
pub trait InputSource {
    fn subscribe(&mut self, channel: InputChannel) -> Box<dyn InputSubscription>;
}

/// A live registration on an [`InputSource`]
pub trait InputSubscription {
    fn channel(&self) -> InputChannel;

    /// Stop delivery; calling this more than once is harmless
    fn cancel(&mut self);
}

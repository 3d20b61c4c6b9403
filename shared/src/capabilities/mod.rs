mod delay;

pub use self::delay::{Delay, DelayOperation, DelayOutput};

pub use crux_core::render::Render;

use crate::event::Event;
use crate::App;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub delay: Delay<Event>,
}

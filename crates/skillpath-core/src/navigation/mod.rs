//! Navigation state machine: views, actions and the navigator reducer.

mod action;
mod machine;
mod view;

pub use action::Action;
pub use machine::Navigator;
pub use view::View;

//! Reply submission state machine
//!
//! Pure transitions in the Elm style: the runtime feeds events, gets back
//! the next state plus the effects it must carry out.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{SubmitContext, SubmitState};
pub use transition::transition;

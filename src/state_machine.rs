//! Date-fact state machine
//!
//! Pure transitions from (state, event) to (state', effects). All I/O
//! happens in the runtime, which executes the returned effects.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use state::{Display, FactState, RequestToken, TransitionContext};
pub use transition::{transition, TransitionError};

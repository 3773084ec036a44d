//! Play mode — the turn-construction and synchronization state machine.
//!
//! A user action or timer fires a named message on the controller; the
//! controller delegates it to the current state's handler, which mutates the
//! turn data and returns a transition. The entering state's entry hook
//! updates the external collaborators and may issue a gateway call or start
//! the poll timer, chaining further transitions until the machine settles.

mod controller;
mod states;

pub use controller::PlayController;
pub use states::{PlayMessage, StateName};

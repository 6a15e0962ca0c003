pub mod gate;
pub mod handoff;
pub mod probe;
pub mod retry;

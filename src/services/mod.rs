pub mod gate;
pub mod handoff;
pub mod redirect;
pub mod session;

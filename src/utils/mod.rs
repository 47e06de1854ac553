//! Various useful things.

pub mod net;

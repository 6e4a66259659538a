//! Background tasks spawned at startup.

pub mod idle_sweep;

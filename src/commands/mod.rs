//! Command implementations for linkweight

pub mod config;
pub mod dispatch;
pub mod excluded;
pub mod sizes;
pub mod tags;
pub mod watch;
pub mod weight;

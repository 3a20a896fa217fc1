//! # Audio Module
//!
//! Motor de reproducción por guild de Open Player.
//!
//! This module contains the playback engine proper:
//! - One continuously-running session per guild
//! - FIFO queue with a paginated read view
//! - Bounded retries with a wall-clock resume offset
//! - Inactivity-driven teardown
//!
//! ## Architecture
//!
//! The engine is built around three main components:
//!
//! ### [`player`] - Session Manager
//! - Owns the guild → session registry and the command surface
//! - Drives the Idle/Connecting/Playing/Paused/Retrying/Terminated
//!   state machine, one serialized timeline per guild
//!
//! ### [`session`] - Session State
//! - The per-guild state bundle and its serialized slot
//! - Registry with atomic insert-if-absent semantics
//!
//! ### [`queue`] / [`device`] - Queue and Transport Boundary
//! - FIFO queue whose head is the in-flight track
//! - Abstract playback-device contract with async event delivery

pub mod device;
pub mod player;
pub mod queue;
pub mod session;

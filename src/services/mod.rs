//! Domain rules for the tournament tree and player registrations.
//!
//! Every function here is generic over [`sea_orm::ConnectionTrait`], so the
//! same rule runs against the pool for reads and against an open transaction
//! when it is part of a multi-row mutation.

pub mod cascade;
pub mod hierarchy;
pub mod lookup;
pub mod players;
pub mod registrations;
pub mod tournaments;

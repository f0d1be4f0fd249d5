// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod availability;
pub mod booking;
pub mod entitlement;
pub mod schedule;

pub use availability::{availability, Availability};
pub use booking::{book, cancel};
pub use entitlement::{check_credits, CreditCheck, CreditDenial};
pub use schedule::{schedule_view, ProjectedSlot, ScheduleView};

// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod booking;
pub mod membership;
pub mod plan;
pub mod slot;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use membership::{Membership, MembershipStatus};
pub use plan::{MembershipPlan, PlanType};
pub use slot::TimeSlot;
pub use user::{User, UserRole};

//! API route modules

pub mod health;
pub mod otp;
pub mod waitlist;

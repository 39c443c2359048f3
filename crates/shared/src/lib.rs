//! Shared process bootstrap for SmtpMailer services

pub mod bootstrap;

//! Parsers voor tekstuele invoer.

pub mod robtarget;

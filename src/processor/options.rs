//! Fixed option tables for request field defaulting.
//!
//! Each table is an immutable sequence; unset fields are filled by a uniform
//! random draw over the matching table.

use rand::Rng;

pub const TEAMS: &[&str] = &["payments", "recommendations", "search", "devops"];

pub const REQUEST_TYPES: &[&str] = &[
    "new_environment",
    "dashboard",
    "custom_pipeline",
    "debug_help",
];

pub const URGENCY_LEVELS: &[&str] = &["low", "medium", "high"];

pub const RESPONSES: &[&str] = &["received", "delivered", "rejected", "needs_info"];

pub const COMMENTS: &[&str] = &[
    "Have you tried turning it off and on again?",
    "Auto-approved by the coffee machine ☕.",
    "We'll add it to the backlog — right behind the other 437 items.",
    "Okay, but only because you bribed us with cookies.",
    "We'll pretend this never happened.",
    "Budget approved by the CFO's cat.",
];

pub const DEFAULT_TITLE: &str = "Platform request";
pub const DEFAULT_DESCRIPTION: &str = "Request description";

/// Uniform random draw from an option table.
pub fn pick<R: Rng + ?Sized>(rng: &mut R, options: &'static [&'static str]) -> &'static str {
    options[rng.gen_range(0..options.len())]
}

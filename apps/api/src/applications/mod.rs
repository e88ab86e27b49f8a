// Job seeker's application tracking table and dashboard counters.

pub mod handlers;
pub mod tracker;

// tests/support/mocks/mod.rs
pub mod repos;
pub mod time;
pub mod util;

pub use repos::{BlindSlugReadRepo, CountingReviewRepo};
pub use time::fixed_now;
pub use util::DummyClock;

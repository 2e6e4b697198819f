//! Stock, catalog and order persistence with the fulfillment core.

pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod seeding;

#[cfg(test)]
mod test;

//! Statistical aggregation over movie collections.
//!
//! The three engines in [`logic`] (bucketing, ranking, summary) are pure,
//! read-only functions over a borrowed slice of records. They never mutate
//! their input and can be called repeatedly or from several threads.

pub mod logic;

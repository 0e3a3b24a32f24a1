//! Storage backends behind [`LinkRepository`](crate::domain::repositories::LinkRepository).

pub mod persistence;

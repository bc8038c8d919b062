//! Formats resource state for stdout.

use anyhow::Result;
use newsdesk_core::{Pagination, ResourceState};
use serde::Serialize;

pub fn list<T: Serialize>(state: &ResourceState<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(state.items())?);
    if let Some(pagination) = state.pagination() {
        eprintln!("{}", page_summary(&pagination, state.items().len()));
    }
    Ok(())
}

pub fn current<T: Serialize>(state: &ResourceState<T>) -> Result<()> {
    if let Some(item) = state.current() {
        println!("{}", serde_json::to_string_pretty(item)?);
    }
    Ok(())
}

pub fn value<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn page_summary(pagination: &Pagination, shown: usize) -> String {
    format!(
        "page {} of {} ({} shown, {} total)",
        pagination.page, pagination.pages, shown, pagination.total
    )
}

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use lazy_static::lazy_static;
use crate::circulation::domain::model::LoanEntity;
use crate::core::library::PaginatedResult;
use crate::medias::domain::model::MediaEntity;
use crate::members::domain::model::MemberEntity;

// Process-wide store for dev mode and tests. A single mutex guards all three
// tables so that a repository can read and write across tables under one lock,
// which is what gives borrow and return their atomicity in this mode.
#[derive(Debug, Default)]
pub(crate) struct MemoryDatabase {
    pub medias: HashMap<String, MediaEntity>,
    pub members: HashMap<String, MemberEntity>,
    pub loans: HashMap<String, LoanEntity>,
}

lazy_static! {
    static ref DATABASE: Mutex<MemoryDatabase> = Mutex::new(MemoryDatabase::default());
}

pub(crate) fn lock_database() -> MutexGuard<'static, MemoryDatabase> {
    // a poisoned lock only means a test panicked mid-write
    DATABASE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// Offset-token pagination over an already filtered and sorted snapshot. The
// next-page token is the numeric offset of the first record not returned.
pub(crate) fn paginate<T>(records: Vec<T>, page: Option<&str>, page_size: usize) -> PaginatedResult<T> {
    let offset = page
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(0);
    let total = records.len();
    let selected: Vec<T> = records.into_iter().skip(offset).take(page_size).collect();
    let next_page = if offset + selected.len() < total {
        Some((offset + selected.len()).to_string())
    } else {
        None
    };
    PaginatedResult::new(page, page_size, next_page, selected)
}

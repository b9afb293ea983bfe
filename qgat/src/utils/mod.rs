//! Utility functions and helper macros used throughout the crate.
//!
//! - The shared rayon [`THREAD_POOL`], sized by `QGAT_NUM_THREADS`.
//! - Macros for builder-style `with_*` setters and getters.
//! - Line decoding with a Latin-1 fallback, as QTLdb files are not UTF-8.
//! - QTL name cleanup for summaries.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use rayon::{
    ThreadPool,
    ThreadPoolBuilder,
};
use regex_lite::Regex;

/// Environment variable read once, when the pool is first used.
pub const THREADS_ENV: &str = "QGAT_NUM_THREADS";

pub static THREAD_POOL: Lazy<ThreadPool> = Lazy::new(|| {
    let num_threads: Option<usize> = std::env::var(THREADS_ENV)
        .ok()
        .and_then(|str| str.parse::<usize>().ok());
    ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .expect("Failed to create thread pool")
});

pub fn n_threads() -> usize {
    THREAD_POOL.current_num_threads()
}

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        #[cfg_attr(coverage_nightly, coverage(off))]
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}
pub use getter_fn;

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            #[cfg_attr(coverage_nightly, coverage(off))]
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}
pub use with_field_fn;

/// Decodes a raw line as UTF-8, falling back to Latin-1 byte-per-char
/// decoding. Trailing `\r`/`\n` are removed.
pub fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    let mut end = bytes.len();
    while end > 0 && matches!(bytes[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    let bytes = &bytes[..end];
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

static BRACKETED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\([^)]*\)").expect("static regex is valid")
});

/// Removes bracketed identifiers from a QTL name:
/// `"Milk fat QTL (1234)"` becomes `"Milk fat QTL"`.
pub fn clean_qtl_name(name: &str) -> String {
    BRACKETED.replace_all(name, "").trim().to_string()
}

/// Digits of the last bracketed number in `s`, e.g. `"1234"` for
/// `"Milk fat (1234)"`.
pub fn bracketed_number(s: &str) -> Option<&str> {
    static NUMBER: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\((\d+)\)").expect("static regex is valid")
    });
    NUMBER
        .captures_iter(s)
        .last()
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

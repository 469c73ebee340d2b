//! Ordering of canonical cell text.
//!
//! Sorting and group listing share one comparison:
//!
//! 1. empty text first, then numeric strings, then everything else;
//! 2. numeric strings compare by value, so `"9"` sorts before `"10"`;
//! 3. other text compares with the Chinese (pinyin) collation from ICU, so
//!    `北京` sorts before `上海`;
//! 4. remaining ties fall back to the raw strings.
//!
//! Numbers form their own class so the order stays total.

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use std::cmp::Ordering;

thread_local! {
    static COLLATOR: Option<Collator> =
        match Collator::try_new(&locale!("zh").into(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!(error = %e, "zh collation unavailable; comparing text by code point");
                None
            }
        };
}

/// Compare two canonical strings.
#[must_use]
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let (ka, kb) = (Key::of(a), Key::of(b));
    match (ka, kb) {
        (Key::Number(x), Key::Number(y)) => x.total_cmp(&y),
        (Key::Text, Key::Text) => collate(a, b),
        _ => ka.rank().cmp(&kb.rank()),
    }
    .then_with(|| a.cmp(b))
}

fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase)),
    })
}

#[derive(Clone, Copy)]
enum Key {
    Empty,
    Number(f64),
    Text,
}

impl Key {
    fn of(s: &str) -> Self {
        if s.is_empty() {
            Key::Empty
        } else if let Some(n) = as_number(s) {
            Key::Number(n)
        } else {
            Key::Text
        }
    }

    fn rank(self) -> u8 {
        match self {
            Key::Empty => 0,
            Key::Number(_) => 1,
            Key::Text => 2,
        }
    }
}

fn as_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

//! Unique tokens for scratch copies.
//! A token names one scratch directory under the temp root for a single move attempt.
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh token, unique within this process and very unlikely to collide across processes.
/// Pattern: <pid>-<nanos>-<seq>
pub fn temp_copy_id() -> String {
    let pid = std::process::id();
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{pid}-{nanos}-{seq}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn uniqueness_concurrent() {
        let mut handles = Vec::new();
        for _ in 0..32 {
            handles.push(thread::spawn(temp_copy_id));
        }
        let mut set = HashSet::new();
        for h in handles {
            assert!(set.insert(h.join().unwrap()));
        }
        assert_eq!(set.len(), 32);
    }

    #[test]
    fn token_is_a_single_path_segment() {
        let id = temp_copy_id();
        assert!(!id.contains('/') && !id.contains('\\'));
    }
}

//! Per-render output names.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Returns a base name no other render in this or a concurrent process will
/// produce: `<stem>_<YYYYmmdd_HHMMSS_mmm>_<pid>_<seq>`.
pub(crate) fn unique_base_name(stem: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S_%3f");
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{stem}_{timestamp}_{}_{seq}", std::process::id())
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, thread};

    use super::*;

    #[test]
    fn test_shape() {
        let name = unique_base_name("mindmap");
        let parts: Vec<_> = name.split('_').collect();

        assert_eq!(parts[0], "mindmap");
        assert_eq!(parts[1].len(), 8);
        assert_eq!(parts[2].len(), 6);
        assert_eq!(parts[3].len(), 3);
        assert_eq!(parts[4], std::process::id().to_string());
        assert!(parts[5].parse::<u64>().is_ok());
    }

    #[test]
    fn test_unique_across_threads() {
        let names: Vec<String> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..50)
                            .map(|_| unique_base_name("map"))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect()
        });

        let distinct: HashSet<_> = names.iter().collect();
        assert_eq!(distinct.len(), names.len());
    }
}

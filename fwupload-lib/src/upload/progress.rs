use std::{
    cmp::min,
    sync::atomic::{AtomicU64, AtomicU8, Ordering},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub position: u64,
    pub total: u64,
    pub percent: u8,
}

/// `round(loaded / total * 100)`, clamped to 100. `None` when the total is unknown.
pub fn percent_of(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let loaded = min(loaded, total) as u128;
    let total = total as u128;
    let percent = (loaded * 100 + total / 2) / total;
    Some(min(percent, 100) as u8)
}

/// Byte counter shared by all parts of one request.
#[derive(Debug)]
pub struct ProgressTracker {
    total: u64,
    sent: AtomicU64,
    percent: AtomicU8,
}

impl ProgressTracker {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            sent: AtomicU64::new(0),
            percent: AtomicU8::new(0),
        }
    }

    /// Only returns a progress when the percentage went up.
    pub fn advance(&self, len: u64) -> Option<UploadProgress> {
        let sent = self.sent.fetch_add(len, Ordering::SeqCst).saturating_add(len);
        let position = min(sent, self.total);
        let percent = percent_of(position, self.total)?;
        let previous = self.percent.fetch_max(percent, Ordering::SeqCst);
        if percent <= previous {
            return None;
        }
        Some(UploadProgress {
            position,
            total: self.total,
            percent,
        })
    }
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// Zero-based index of the active question; equals `total` once finished.
    pub current: usize,
    pub total: usize,
    pub score: u32,
    pub is_finished: bool,
}

/// CSS width for a fill bar, from a fraction in `[0, 1]`.
#[must_use]
pub fn fill_percent(fraction: f64) -> String {
    let pct = (fraction * 100.0).clamp(0.0, 100.0);
    format!("{pct:.0}%")
}

/// CSS width for the session progress bar, counting the active question.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_percent(current: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    let shown = (current + 1).min(total);
    fill_percent(shown as f64 / total as f64)
}

/// Aggregated view of quiz progress, useful for progress bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    /// Questions graded so far, including the current one once submitted.
    pub answered: usize,
    pub remaining: usize,
    /// `answered / total` as a whole percentage.
    pub percent: u8,
    pub is_complete: bool,
}

impl QuizProgress {
    pub(crate) fn empty() -> Self {
        Self {
            total: 0,
            answered: 0,
            remaining: 0,
            percent: 0,
            is_complete: false,
        }
    }

    pub(crate) fn new(answered: usize, total: usize) -> Self {
        let answered = answered.min(total);
        Self {
            total,
            answered,
            remaining: total - answered,
            percent: rounded_percent(answered, total),
            is_complete: total > 0 && answered == total,
        }
    }
}

/// `round(100 * part / total)` with halves rounded up, computed exactly in integers.
///
/// Returns 0 when `total` is 0.
#[must_use]
pub fn rounded_percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total) as u128;
    let total = total as u128;
    let percent = (200 * part + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirds_round_to_nearest() {
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(rounded_percent(1, 2), 50);
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(1, 200), 1);
    }

    #[test]
    fn bounds() {
        assert_eq!(rounded_percent(0, 5), 0);
        assert_eq!(rounded_percent(5, 5), 100);
        assert_eq!(rounded_percent(0, 0), 0);
    }

    #[test]
    fn progress_counts_remaining() {
        let progress = QuizProgress::new(2, 5);
        assert_eq!(progress.remaining, 3);
        assert_eq!(progress.percent, 40);
        assert!(!progress.is_complete);
        assert!(QuizProgress::new(5, 5).is_complete);
    }
}

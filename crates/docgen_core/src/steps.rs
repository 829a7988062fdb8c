/// Pipeline phases the backend reports by position.
pub const STEP_LABELS: [&str; 5] = [
    "Cloning Repo",
    "Parsing files",
    "Identifying APIs",
    "Creating OpenAPI Specs yaml",
    "Creating Docs",
];

pub const STEP_COUNT: usize = STEP_LABELS.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Completed,
    Failed,
}

/// Status of every step given the index of the step in progress.
///
/// When `failed` is set the step at `current` is reported as `Failed`
/// instead of `Active`.
pub fn derive_step_statuses(current: usize, count: usize, failed: bool) -> Vec<StepStatus> {
    (0..count)
        .map(|index| match index.cmp(&current) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal if failed => StepStatus::Failed,
            std::cmp::Ordering::Equal => StepStatus::Active,
            std::cmp::Ordering::Greater => StepStatus::Pending,
        })
        .collect()
}

pub fn completed_steps(count: usize) -> Vec<StepStatus> {
    vec![StepStatus::Completed; count]
}

/// Maps a backend step index onto `0..count`.
///
/// Missing and negative values fall back to 0, values past the end stick to
/// the last step.
pub fn clamp_step(raw: Option<i64>, count: usize) -> usize {
    let last = count.saturating_sub(1);
    match raw {
        Some(value) if value > 0 => usize::try_from(value).map_or(last, |v| v.min(last)),
        _ => 0,
    }
}

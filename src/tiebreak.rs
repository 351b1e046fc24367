use std::cmp::Ordering;

pub type Criterion<T> = fn(&T, &T) -> Ordering;

/// Applies `criteria` left to right and returns the first non-equal verdict.
pub fn cascade<T>(criteria: &[Criterion<T>], a: &T, b: &T) -> Ordering {
    criteria
        .iter()
        .map(|cmp| cmp(a, b))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Stable sort by the cascade; entries every criterion considers equal keep their input order.
pub fn rank_by<T>(items: &mut [T], criteria: &[Criterion<T>]) {
    items.sort_by(|a, b| cascade(criteria, a, b));
}

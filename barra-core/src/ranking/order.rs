//! Comparators shared by every ranking.

use std::cmp::Ordering;

use crate::scoring::ModalityResult;

/// Descending order for floats; NaN compares equal.
pub fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Lighter first. Unknown bodyweight sorts after any known one.
pub fn lighter_first(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Tie-break for equal scores: lighter bodyweight, then earlier registration.
pub fn tie_break(a: &ModalityResult, b: &ModalityResult) -> Ordering {
    lighter_first(a.entry.bodyweight, b.entry.bodyweight).then_with(|| a.entry.id.cmp(&b.entry.id))
}

/// Order weight-class labels numerically: "59" < "66" < "120" < "120+".
/// Labels without a number sort after numeric ones, alphabetically.
pub fn compare_weight_classes(a: &str, b: &str) -> Ordering {
    match (parse_weight_class(a), parse_weight_class(b)) {
        (Some((x, x_plus)), Some((y, y_plus))) => x
            .partial_cmp(&y)
            .unwrap_or(Ordering::Equal)
            .then(x_plus.cmp(&y_plus))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Pull the numeric limit and the open-ended "+" marker out of a label such
/// as "-59", "59kg", "120+" or "+120".
fn parse_weight_class(label: &str) -> Option<(f64, bool)> {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let limit = digits.parse::<f64>().ok()?;
    Some((limit, label.contains('+')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_classes_sort_numerically() {
        let mut classes = vec!["120+", "66", "105", "59", "120", "-47", "open"];
        classes.sort_by(|a, b| compare_weight_classes(a, b));
        assert_eq!(classes, vec!["-47", "59", "66", "105", "120", "120+", "open"]);
    }

    #[test]
    fn decimal_labels() {
        assert_eq!(compare_weight_classes("52,5", "52"), Ordering::Greater);
        assert_eq!(compare_weight_classes("57kg", "57"), Ordering::Greater);
    }

    #[test]
    fn unknown_bodyweight_sorts_last() {
        assert_eq!(lighter_first(Some(80.0), None), Ordering::Less);
        assert_eq!(lighter_first(Some(80.0), Some(79.5)), Ordering::Greater);
        assert_eq!(lighter_first(None, None), Ordering::Equal);
    }

    #[test]
    fn descending_orders_high_first() {
        let mut xs = vec![1.0, 3.0, 2.0];
        xs.sort_by(|a, b| descending(*a, *b));
        assert_eq!(xs, vec![3.0, 2.0, 1.0]);
    }
}

/// Offset/limit windowing over an already filtered and sorted sequence.
///
/// Page numbers are 1-based. Pagination only applies when both values are
/// present; a page number or size of zero or less yields an empty result,
/// as does a page past the end of the sequence.
pub fn paginate<T>(items: Vec<T>, page_number: Option<i64>, page_size: Option<i64>) -> Vec<T> {
    let (Some(page_number), Some(page_size)) = (page_number, page_size) else {
        return items;
    };

    if page_number <= 0 || page_size <= 0 {
        return Vec::new();
    }

    // A window that far out is past the end of any sequence.
    let Some(skip) = (page_number - 1).checked_mul(page_size) else {
        return Vec::new();
    };
    let skip = skip as usize;

    items
        .into_iter()
        .skip(skip)
        .take(page_size as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_are_one_based() {
        let items: Vec<i32> = (0..5).collect();

        assert_eq!(paginate(items.clone(), Some(1), Some(2)), vec![0, 1]);
        assert_eq!(paginate(items.clone(), Some(2), Some(2)), vec![2, 3]);
        assert_eq!(paginate(items.clone(), Some(3), Some(2)), vec![4]);
        assert_eq!(paginate(items, Some(4), Some(2)), Vec::<i32>::new());
    }

    #[test]
    fn missing_either_value_disables_pagination() {
        let items: Vec<i32> = (0..5).collect();

        assert_eq!(paginate(items.clone(), Some(1), None).len(), 5);
        assert_eq!(paginate(items.clone(), None, Some(2)).len(), 5);
        assert_eq!(paginate(items, None, None).len(), 5);
    }

    #[test]
    fn nonpositive_values_yield_empty() {
        let items: Vec<i32> = (0..5).collect();

        assert!(paginate(items.clone(), Some(0), Some(2)).is_empty());
        assert!(paginate(items.clone(), Some(-1), Some(2)).is_empty());
        assert!(paginate(items, Some(1), Some(0)).is_empty());
    }
}

use std::collections::BTreeSet;

use super::model::IrisDataset;

// ---------------------------------------------------------------------------
// Label-based row selection
// ---------------------------------------------------------------------------

/// Indices of rows carrying a species label (usable as training data).
pub fn labeled_indices(dataset: &IrisDataset) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.is_labeled())
        .map(|(i, _)| i)
        .collect()
}

/// Indices of rows without a label (inference-only rows).
pub fn unlabeled_indices(dataset: &IrisDataset) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| !rec.is_labeled())
        .map(|(i, _)| i)
        .collect()
}

/// Indices of rows whose label is in `selected`.
///
/// An empty selection selects nothing; unlabeled rows never match since
/// they have no label to compare.
pub fn indices_with_species(dataset: &IrisDataset, selected: &BTreeSet<String>) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            rec.species
                .as_ref()
                .map(|label| selected.contains(label))
                .unwrap_or(false)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::IrisRecord;

    fn mixed_dataset() -> IrisDataset {
        IrisDataset::from_records(vec![
            IrisRecord::new(5.1, 3.5, 1.4, 0.2, Some("setosa".into())),
            IrisRecord::new(6.0, 2.9, 4.5, 1.5, None),
            IrisRecord::new(6.3, 3.3, 6.0, 2.5, Some("virginica".into())),
            IrisRecord::new(5.5, 2.4, 3.8, 1.1, Some("versicolor".into())),
        ])
    }

    #[test]
    fn labeled_and_unlabeled_split_the_dataset() {
        let ds = mixed_dataset();
        assert_eq!(labeled_indices(&ds), vec![0, 2, 3]);
        assert_eq!(unlabeled_indices(&ds), vec![1]);
    }

    #[test]
    fn selection_by_label() {
        let ds = mixed_dataset();
        let selected: BTreeSet<String> = ["setosa", "versicolor"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(indices_with_species(&ds, &selected), vec![0, 3]);
    }

    #[test]
    fn empty_selection_selects_nothing() {
        let ds = mixed_dataset();
        assert!(indices_with_species(&ds, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn full_selection_keeps_all_labeled_rows() {
        let ds = mixed_dataset();
        let all = ds.species_labels.clone();
        assert_eq!(indices_with_species(&ds, &all), labeled_indices(&ds));
    }
}

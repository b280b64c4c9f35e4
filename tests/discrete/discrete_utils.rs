use ndarray::{Array1, array};

use compressinfo::estimators::approaches::discrete::discrete_utils::{
    DiscreteDataset, count_frequencies, reduce_joint_space_compact, sliding_word_codes,
};

#[test]
fn count_frequencies_dense_and_sparse_paths() {
    let dense = count_frequencies(array![0, 1, 1, 3, 3, 3].view());
    assert_eq!(dense.len(), 3);
    assert_eq!(dense[&0], 1);
    assert_eq!(dense[&1], 2);
    assert_eq!(dense[&3], 3);

    // Negative values and a wide range take the HashMap path
    let sparse = count_frequencies(array![-5, 100_000, -5].view());
    assert_eq!(sparse.len(), 2);
    assert_eq!(sparse[&-5], 2);
    assert_eq!(sparse[&100_000], 1);

    assert!(count_frequencies(Array1::<i32>::zeros(0).view()).is_empty());
}

#[test]
fn dataset_probabilities_sum_to_one() {
    let ds = DiscreteDataset::from_data(array![4, 4, 7, 9]);
    assert_eq!(ds.n, 4);
    assert_eq!(ds.k, 3);
    let total: f64 = ds.probabilities().sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert_eq!(ds.map_probs(), array![0.5, 0.5, 0.25, 0.25]);
}

#[test]
fn joint_reduction_assigns_first_occurrence_codes() {
    let x = array![1, 1, 2, 2];
    let y = array![5, 6, 5, 5];
    let joint = reduce_joint_space_compact(&[x.view(), y.view()]);
    assert_eq!(joint, array![0, 1, 2, 2]);
}

#[test]
fn sliding_words_of_periodic_sequence() {
    let seq = array![0, 1, 0, 1, 0];
    // words of length 2: 01 10 01 10
    assert_eq!(sliding_word_codes(seq.view(), 2), array![0, 1, 0, 1]);
    // words of length 1 are the symbols themselves, compactly coded
    assert_eq!(sliding_word_codes(seq.view(), 1), array![0, 1, 0, 1, 0]);
    // one word spanning everything
    assert_eq!(sliding_word_codes(seq.view(), 5).len(), 1);
}

// Hypothesis testing on grouped measurements
//
// Two procedures over the same (method, dose) grouping:
// - Pairwise Welch t-tests on every pair sharing exactly one dimension,
//   corrected with Benjamini–Hochberg across the batch
// - Label-permutation tests of a mean difference, one per dose stratum
//
// Uses aprender (crates.io) for the t-test statistic, statrs for its f64 tail
// probability and trueno for descriptive statistics; correction and
// permutation are implemented here.

mod correction;
mod pairwise;
mod permutation;
mod summary;
mod welch;

pub use correction::benjamini_hochberg;
pub use pairwise::{
    comparable_pairs, pairwise_tests, GroupPairResult, PairwiseResults, SharedDimension,
};
pub use permutation::{
    permutation_test, stratified_permutation_tests, PermutationNullDistribution,
    StratumPermutation, DEFAULT_PERMUTATIONS,
};
pub use summary::{describe_groups, median, GroupSummary};
pub use welch::{welch_t_test, WelchTest};

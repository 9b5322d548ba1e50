use crate::model::FileStat;
use std::collections::HashMap;

/// Order aggregated stats by commit count, breaking ties on total
/// churn, both descending. Ties beyond those two keys keep the sort's
/// stable order but are not part of the contract.
pub fn rank(stats: HashMap<String, FileStat>) -> Vec<FileStat> {
    let mut ranked: Vec<FileStat> = stats.into_values().collect();
    ranked.sort_by(|a, b| {
        b.commit_count
            .cmp(&a.commit_count)
            .then_with(|| b.churn().cmp(&a.churn()))
    });
    ranked
}

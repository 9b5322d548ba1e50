use crate::model::{ChangeLine, FileStat};
use std::collections::HashMap;

/// Group change records by path, summing additions and deletions and
/// counting how many commits touched each file.
///
/// Every record counts as one touch, including zero-stat records from
/// binary files and pure renames. Absent counts contribute 0 to the
/// sums, so a single binary marker can never corrupt the cumulative
/// total for a file.
pub fn aggregate(lines: &[ChangeLine]) -> HashMap<String, FileStat> {
    let mut map: HashMap<String, FileStat> = HashMap::new();
    for line in lines {
        let stat = map
            .entry(line.path.clone())
            .or_insert_with(|| FileStat::new(line.path.clone()));
        stat.record(line);
    }
    map
}

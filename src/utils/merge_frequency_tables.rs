use crate::types::FrequencyTable;

/// Adds two frequency tables together.
///
/// Addition is associative and commutative, so partial tables can be combined in any
/// order (e.g. by a parallel reduce). The smaller table is folded into the larger one.
pub fn merge_frequency_tables(left: FrequencyTable, right: FrequencyTable) -> FrequencyTable {
    let (mut merged, smaller) = if left.len() >= right.len() {
        (left, right)
    } else {
        (right, left)
    };

    for (token, frequency) in smaller {
        *merged.entry(token).or_insert(0) += frequency;
    }

    merged
}

// Default forbidden adjacent-production pairs.
//
// A long vowel squeezed into a metrically short slot is a licensed
// liberty, but two of them back to back are not: consecutive
// shortened-long realizations are forbidden across Short-to-Short edges.

use taqti_core::WeightClass;
use taqti_graph::graph::BadComboTable;

/// The default bad-combination table for Urdu scansion.
pub fn default_table() -> BadComboTable {
    let mut table = BadComboTable::new();
    table.forbid(
        WeightClass::Short,
        WeightClass::Short,
        &[
            ("s_cvv", "s_cvv"),
            ("s_cvv", "s_vv"),
            ("s_vv", "s_cvv"),
            ("s_vv", "s_vv"),
        ],
    );
    table
}

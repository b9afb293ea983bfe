use indexmap::IndexMap;
use smallstr::SmallString;

pub const SMALLSTR_SIZE: usize = 20;
/// Chromosome / sequence name. Compared by exact string equality only.
pub type SeqName = SmallString<[u8; SMALLSTR_SIZE]>;
/// Genomic coordinate.
pub type PosType = u64;
/// Insertion-ordered attribute mapping of a feature.
pub type AttrMap = IndexMap<String, String>;
/// One assembled output row, `column -> value` in column order.
pub type OutputRow = IndexMap<String, String>;

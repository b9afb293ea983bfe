pub use crate::data_structs::annotation::Feature;
pub use crate::data_structs::coords::{
    ChromosomeIndex,
    GenomicInterval,
};
pub use crate::data_structs::typedef::{
    AttrMap,
    OutputRow,
    SeqName,
};
pub use crate::data_structs::{
    CoordConvention,
    Delimiter,
    GtfDialect,
    NoMatchPolicy,
    OverlapMode,
    QueryRegion,
    ReferenceFormat,
    Strand,
};
pub use crate::error::{
    FailureClass,
    FatalError,
    ParseFailure,
    RecordError,
};
pub use crate::io::{
    read_features,
    read_reference,
    read_regions,
    read_table,
    Compression,
    ParseConfig,
    ParseReport,
    RecordReader,
    TableWriter,
};
pub use crate::tools::overlap::{
    aggregate,
    AnnotationSummary,
    OverlapConfig,
    OverlapOutput,
    ResultAssembler,
    RunSummary,
    TraitFrequency,
};

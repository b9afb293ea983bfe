macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod common {
    define_strings! {
        INPUT =
            "Input file with regions of interest: chromosome, start and end in \
            the first three columns. Tab (.tsv), comma (.csv) or whitespace \
            (other extensions) delimited; an optional header line is detected \
            automatically.";
        OUTPUT =
            "Output TSV file. A .gz extension compresses the output.";
        FORCE =
            "Overwrite existing output files.";
        REPORT_MISSING =
            "Write a row with a 'no overlap' note for regions without any \
            overlapping record.";
        MAX_FAILURES =
            "Abort when a file has more malformed lines than this. By default \
            malformed lines are skipped and counted.";
        ZERO_BASED =
            "Input coordinates are 0-based half-open (BED style) instead of \
            1-based closed.";
        STRICT_CHROMOSOMES =
            "Fail when no input chromosome is present in the reference instead \
            of only reporting the mismatch.";
        SUMMARY_JSON =
            "Also write the run summary (counts, unknown chromosomes, parse \
            failures) as JSON to this path.";
    }
}

pub mod qtl {
    define_strings! {
        SPECIES =
            "Species whose bundled QTLdb file is used. The file is looked up in \
            --qtldb or in the directory given by QGAT_QTLDB_DIR.";
        QTLDB =
            "Directory holding the QTLdb BED/GFF files (optionally gzipped).";
        REFERENCE =
            "Explicit QTL reference file (.bed or .gff, optionally gzipped) \
            instead of a species lookup.";
        TRAIT =
            "Use the GFF reference to report trait-level QTLs with all their \
            attributes.";
    }
}

pub mod annotate {
    define_strings! {
        GTF =
            "GTF file used for gene annotation (optionally gzipped).";
        NCBI =
            "The GTF file follows NCBI attribute conventions (gene, db_xref \
            GeneID) instead of Ensembl ones.";
        FEATURE_TYPE =
            "GTF feature types to annotate with. Defaults to 'gene'.";
    }
}

pub mod freq {
    define_strings! {
        INPUT =
            "TSV output of a trait-level QTL run (qtl --trait).";
        OUTPUT =
            "Output TSV with one row per trait, sorted by descending count.";
        COLUMN =
            "Column to count.";
    }
}

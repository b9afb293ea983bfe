#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{
    Rng,
    SeedableRng,
};
use tempfile::TempDir;

pub const TRAITS: [&str; 4] = [
    "Milk_fat_yield",
    "Body_weight",
    "Somatic_cell_score",
    "Calving_ease",
];

/// One generated QTL, in 1-based closed coordinates.
#[derive(Debug, Clone)]
pub struct DemoQtl {
    pub chr:        String,
    pub start:      u64,
    pub end:        u64,
    pub id:         usize,
    pub trait_name: &'static str,
}

impl DemoQtl {
    pub fn gff_line(&self) -> String {
        format!(
            "{}\tAnimal QTLdb\t{}\t{}\t{}\t.\t.\t.\tQTL_ID={};Name={} QTL ({});P-value={:.3}",
            self.chr,
            self.trait_name,
            self.start,
            self.end,
            self.id,
            self.trait_name.replace('_', " "),
            self.id,
            1.0 / (self.id as f64 + 1.0)
        )
    }

    pub fn bed_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{} QTL ({})",
            self.chr,
            self.start - 1,
            self.end,
            self.trait_name.replace('_', " "),
            self.id
        )
    }

    pub fn overlaps(
        &self,
        chr: &str,
        start: u64,
        end: u64,
    ) -> bool {
        self.chr == chr && self.start <= end && start <= self.end
    }
}

/// Seeded generator of QTL reference files and query regions.
pub struct DemoQtlBuilder {
    rng:      StdRng,
    n_chr:    usize,
    chr_len:  u64,
    pub qtls: Vec<DemoQtl>,
}

impl DemoQtlBuilder {
    pub fn new(
        n_qtl: usize,
        n_chr: usize,
        chr_len: u64,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let qtls = (0..n_qtl)
            .map(|id| {
                let start = rng.gen_range(1..chr_len);
                let width = rng.gen_range(1..chr_len / 20);
                DemoQtl {
                    chr: format!("{}", rng.gen_range(1..=n_chr)),
                    start,
                    end: start + width,
                    id: id + 1,
                    trait_name: TRAITS.choose(&mut rng).copied().unwrap_or(TRAITS[0]),
                }
            })
            .collect();
        Self {
            rng,
            n_chr,
            chr_len,
            qtls,
        }
    }

    /// Random regions as `(chr, start, end)`, 1-based closed.
    pub fn regions(
        &mut self,
        n: usize,
    ) -> Vec<(String, u64, u64)> {
        (0..n)
            .map(|_| {
                let start = self.rng.gen_range(1..self.chr_len);
                let end = start + self.rng.gen_range(1..1000);
                (format!("{}", self.rng.gen_range(1..=self.n_chr)), start, end)
            })
            .collect()
    }

    pub fn gff(&self) -> String {
        self.qtls.iter().map(|q| q.gff_line() + "\n").collect()
    }

    pub fn bed(&self) -> String {
        self.qtls.iter().map(|q| q.bed_line() + "\n").collect()
    }
}

pub fn regions_tsv(regions: &[(String, u64, u64)]) -> String {
    let mut out = String::from("chromosome\tstart\tend\n");
    for (chr, start, end) in regions {
        out.push_str(&format!("{chr}\t{start}\t{end}\n"));
    }
    out
}

pub fn write_file(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> anyhow::Result<PathBuf> {
    let path = dir.path().join(name);
    File::create(&path)?.write_all(content.as_bytes())?;
    Ok(path)
}

//! Parsing of the attribute column of GFF and GTF records into an
//! [`AttrMap`].
//!
//! GFF uses `key=value` pairs separated by `;`. GTF uses `key "value";`
//! pairs; Ensembl files follow that strictly, while NCBI files mix in
//! `key=value` pairs and leave quotes inside values unescaped. Both GTF
//! dialects end up with the same mapping shape (see
//! [`normalize_gtf_attributes`]).

use crate::data_structs::annotation::feature::*;
use crate::data_structs::enums::GtfDialect;
use crate::data_structs::typedef::AttrMap;
use crate::error::RecordError;

const NCBI_GENE_KEY: &str = "gene";
const NCBI_DBXREF_KEY: &str = "db_xref";
const NCBI_GENEID_PREFIX: &str = "GeneID:";

/// Inserts a pair, joining repeated keys with `,`.
fn insert_joined(
    attributes: &mut AttrMap,
    key: &str,
    value: &str,
) {
    attributes
        .entry(key.to_string())
        .and_modify(|existing| {
            existing.push(',');
            existing.push_str(value);
        })
        .or_insert_with(|| value.to_string());
}

fn invalid(piece: &str) -> RecordError {
    RecordError::InvalidAttribute {
        piece: piece.trim().to_string(),
    }
}

/// Parses a GFF attribute column (`ID=q1;Name=Milk fat;P-value=0.01`).
///
/// Values are kept verbatim (only surrounding whitespace is trimmed). A
/// non-empty piece without `=` is rejected.
pub fn parse_gff_attributes(s: &str) -> Result<AttrMap, RecordError> {
    let mut attributes = AttrMap::new();
    let s = s.trim();
    if s.is_empty() || s == "." {
        return Ok(attributes);
    }

    for pair in s.split(';') {
        if pair.trim().is_empty() {
            continue;
        }
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                insert_joined(&mut attributes, key.trim(), value.trim())
            },
            _ => return Err(invalid(pair)),
        }
    }
    Ok(attributes)
}

/// Parses a GTF attribute column in the given dialect. Returns the raw
/// pairs, see [`normalize_gtf_attributes`] for the canonical keys.
pub fn parse_gtf_attributes(
    s: &str,
    dialect: GtfDialect,
) -> Result<AttrMap, RecordError> {
    match dialect {
        GtfDialect::Ensembl => parse_ensembl(s),
        GtfDialect::Ncbi => parse_ncbi(s),
    }
}

fn parse_ensembl(s: &str) -> Result<AttrMap, RecordError> {
    let mut attributes = AttrMap::new();
    let mut rest = s.trim();

    while !rest.is_empty() {
        let piece = rest.split(';').next().unwrap_or(rest);
        let key_end = rest
            .find(char::is_whitespace)
            .ok_or_else(|| invalid(piece))?;
        let key = &rest[..key_end];
        if key.contains(['=', '"', ';']) {
            return Err(invalid(piece));
        }
        rest = rest[key_end..].trim_start();

        let value = if let Some(quoted) = rest.strip_prefix('"') {
            let close = quoted.find('"').ok_or_else(|| invalid(piece))?;
            let value = &quoted[..close];
            rest = quoted[close + 1..].trim_start();
            value
        }
        else {
            // Unquoted values, e.g. `exon_number 1`
            let end = rest.find(';').unwrap_or(rest.len());
            let value = rest[..end].trim();
            if value.is_empty() || value.contains('"') {
                return Err(invalid(piece));
            }
            rest = &rest[end..];
            value
        };

        match rest.strip_prefix(';') {
            Some(tail) => rest = tail.trim_start(),
            None if rest.is_empty() => {},
            None => return Err(invalid(piece)),
        }
        insert_joined(&mut attributes, key, value);
    }
    Ok(attributes)
}

/// Splits an NCBI piece into key and raw value. `key=value` wins when the
/// `=` comes before any whitespace.
fn split_ncbi_pair(piece: &str) -> Result<(&str, &str), RecordError> {
    let eq = piece.find('=');
    let ws = piece.find(char::is_whitespace);
    let (key, value) = match (eq, ws) {
        (Some(e), Some(w)) if e < w => (&piece[..e], &piece[e + 1..]),
        (Some(e), None) => (&piece[..e], &piece[e + 1..]),
        (_, Some(w)) => (&piece[..w], &piece[w..]),
        (None, None) => return Err(invalid(piece)),
    };
    if key.is_empty() || key.contains('"') {
        return Err(invalid(piece));
    }
    Ok((key, value.trim()))
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

fn closes_quote(value: &str) -> bool {
    let value = value.trim_end();
    value.len() > 1 && value.ends_with('"')
}

fn parse_ncbi(s: &str) -> Result<AttrMap, RecordError> {
    let mut attributes = AttrMap::new();
    // A quoted value that contains `;` spans several split pieces.
    let mut pending: Option<(&str, String)> = None;

    for piece in s.split(';') {
        if let Some((key, mut value)) = pending.take() {
            value.push(';');
            value.push_str(piece);
            if closes_quote(piece) {
                insert_joined(&mut attributes, key, unquote(&value));
            }
            else {
                pending = Some((key, value));
            }
            continue;
        }

        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let (key, value) = split_ncbi_pair(piece)?;
        if value.starts_with('"') && !closes_quote(value) {
            pending = Some((key, value.to_string()));
            continue;
        }
        insert_joined(&mut attributes, key, unquote(value));
    }

    if let Some((key, value)) = pending {
        insert_joined(&mut attributes, key, unquote(&value));
    }
    Ok(attributes)
}

/// Brings parsed GTF attributes into the canonical shape:
/// `feature_type`, `gene_id`, `gene_name` (when known), then every other
/// attribute in source order.
///
/// NCBI files name genes with `gene` and carry the numeric id in
/// `db_xref "GeneID:N"`; these fill `gene_name` / `gene_id` when the
/// canonical keys are absent. A record without any gene id is rejected, which
/// is what a misdeclared dialect usually looks like.
pub fn normalize_gtf_attributes(
    raw: AttrMap,
    feature_type: &str,
    dialect: GtfDialect,
) -> Result<AttrMap, RecordError> {
    let mut gene_id = raw.get(GENE_ID_KEY).cloned();
    let mut gene_name = raw.get(GENE_NAME_KEY).cloned();

    if dialect == GtfDialect::Ncbi {
        if gene_id.is_none() {
            gene_id = raw.get(NCBI_DBXREF_KEY).and_then(|xrefs| {
                xrefs
                    .split(',')
                    .find_map(|x| x.trim().strip_prefix(NCBI_GENEID_PREFIX))
                    .map(str::to_string)
            });
        }
        if gene_name.is_none() {
            gene_name = raw.get(NCBI_GENE_KEY).cloned();
        }
    }

    let gene_id = gene_id
        .filter(|id| !id.is_empty())
        .ok_or(RecordError::MissingAttribute { key: GENE_ID_KEY })?;

    let mut attributes = AttrMap::with_capacity(raw.len() + 3);
    attributes.insert(FEATURE_TYPE_KEY.to_string(), feature_type.to_string());
    attributes.insert(GENE_ID_KEY.to_string(), gene_id);
    if let Some(name) = gene_name {
        attributes.insert(GENE_NAME_KEY.to_string(), name);
    }
    for (key, value) in raw {
        attributes.entry(key).or_insert(value);
    }
    Ok(attributes)
}

/// Adds the trait-mode keys to raw GFF attributes of a QTLdb record.
///
/// `trait` comes from the feature-type column, `p_value` from `P-value`,
/// `qtl_id` from `QTL_ID` and `qtl_name` from `Name`. Derived keys come first
/// and never replace a raw key of the same name; raw pairs follow unchanged.
pub fn derive_trait_attributes(
    raw: AttrMap,
    feature_type: &str,
) -> AttrMap {
    const DERIVED: [(&str, &str); 3] = [
        (P_VALUE_KEY, "P-value"),
        (QTL_ID_KEY, "QTL_ID"),
        (QTL_NAME_KEY, "Name"),
    ];

    let mut attributes = AttrMap::with_capacity(raw.len() + 4);
    let trait_name = raw
        .get(TRAIT_KEY)
        .cloned()
        .unwrap_or_else(|| feature_type.to_string());
    attributes.insert(TRAIT_KEY.to_string(), trait_name);

    for (derived, source) in DERIVED {
        if raw.contains_key(derived) {
            continue;
        }
        if let Some(value) = raw.get(source) {
            attributes.insert(derived.to_string(), value.clone());
        }
    }
    for (key, value) in raw {
        attributes.entry(key).or_insert(value);
    }
    attributes
}

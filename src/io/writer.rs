//! Rank output
//!
//! The default format is one `<id>\t<rank>` line per node in index order.
//! Ranks are printed in shortest round-trip form with two-digit signed
//! exponents (`1e-05`, `2.5e+16`) and a trailing `.0` on integral values.

use crate::error::RankResult;
use serde::Serialize;
use std::io::{BufWriter, Write};

/// Serialization of the final ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankFormat {
    /// `<id>\t<rank>` per line
    #[default]
    Tsv,
    /// JSON array of `{"node", "rank"}` objects
    Json,
    /// `node,rank` header, then one quoted-as-needed row per node
    Csv,
}

#[derive(Serialize)]
struct RankRecord<'a> {
    node: &'a str,
    rank: f64,
}

/// Write `(identifier, rank)` pairs in the given format.
pub fn write_ranks<'a, W, I>(writer: W, ranks: I, format: RankFormat) -> RankResult<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut out = BufWriter::new(writer);

    match format {
        RankFormat::Tsv => {
            for (node, rank) in ranks {
                writeln!(out, "{}\t{}", node, format_rank(rank))?;
            }
        }
        RankFormat::Csv => {
            writeln!(out, "node,rank")?;
            for (node, rank) in ranks {
                writeln!(out, "{},{}", csv_field(node), format_rank(rank))?;
            }
        }
        RankFormat::Json => {
            let records: Vec<RankRecord<'a>> = ranks
                .into_iter()
                .map(|(node, rank)| RankRecord { node, rank })
                .collect();
            serde_json::to_writer_pretty(&mut out, &records)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Shortest round-trip decimal with a two-digit signed exponent.
pub fn format_rank(rank: f64) -> String {
    if rank.is_nan() {
        return "nan".to_string();
    }
    let repr = format!("{:?}", rank);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

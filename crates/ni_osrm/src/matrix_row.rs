use serde::Serialize;
use tracing::{debug, warn};

use crate::durations_table::{DurationsTable, Seconds};

/// One cell of a durations matrix, labelled with the zone identifiers of its
/// origin and destination. The identifiers borrow from the reference zones.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct MatrixRow<'a> {
    pub duration: Seconds,
    pub to: &'a str,
    pub from: &'a str,
}

/// Turns a durations table into labelled `(duration, to, from)` rows.
///
/// Row `i` and column `j` of the table are matched to `reference[i]` and
/// `reference[j]` purely by position. Cells whose origin or destination
/// position has no entry in `reference` are dropped, so a table larger than
/// the reference is truncated rather than rejected.
///
/// Rows are produced origin by origin, destinations in column order.
pub fn reshape_durations<'a>(
    table: &DurationsTable,
    reference: &[&'a str],
) -> Vec<MatrixRow<'a>> {
    let mut rows = Vec::with_capacity(table.num_cells());
    let mut dropped = 0;

    // (origin position, destination position, duration), positions counted per origin row
    let cells = table.rows().iter().enumerate().flat_map(|(origin, durations)| {
        durations
            .iter()
            .enumerate()
            .map(move |(destination, &duration)| (origin, destination, duration))
    });

    for (origin, destination, duration) in cells {
        match (reference.get(origin), reference.get(destination)) {
            (Some(&from), Some(&to)) => rows.push(MatrixRow { duration, to, from }),
            _ => dropped += 1,
        }
    }


    if dropped > 0 {
        warn!(
            dropped,
            origins = table.num_origins(),
            reference = reference.len(),
            "Durations table does not match the reference zones, unmatched cells dropped"
        );
    }

    debug!(rows = rows.len(), "Reshaped durations table");

    rows
}

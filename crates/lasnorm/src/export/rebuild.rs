//! Turning a (fused) table back into a log.

use crate::fusion::DepthTable;
use crate::las::{Curve, DEPTH_MNEMONIC, WellLog};

/// Rebuild a log from `table`, carrying every header section of `original`
/// over unchanged.
///
/// The depth axis becomes the first curve, named `DEPT`, with the original
/// depth unit and description; the other curves follow the table's column
/// order.
pub fn rebuild_log(table: &DepthTable, original: &WellLog) -> WellLog {
    let mut log = WellLog::new(original.source.clone());
    log.version = original.version.clone();
    log.well = original.well.clone();
    log.params = original.params.clone();
    log.other = original.other.clone();
    log.extra = original.extra.clone();

    log.curves.reserve(table.columns.len() + 1);
    log.curves.push(Curve {
        mnemonic: DEPTH_MNEMONIC.to_string(),
        unit: table.depth.unit.clone(),
        value: table.depth.value.clone(),
        description: table.depth.description.clone(),
        data: table.depth.values.clone(),
    });

    for (name, column) in &table.columns {
        log.curves.push(Curve {
            mnemonic: name.clone(),
            unit: column.unit.clone(),
            value: column.value.clone(),
            description: column.description.clone(),
            data: column.values.clone(),
        });
    }

    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fusion::CollisionPolicy;
    use crate::las::HeaderItem;

    #[test]
    fn test_rebuild_renames_depth_and_keeps_headers() {
        let mut log = WellLog::new("w.las");
        log.well.items.push(HeaderItem::new("WELL", "", "A-1", "WELL"));
        log.params.items.push(HeaderItem::new("BHT", "DEGC", "35", ""));
        log.other.push("remark".into());
        log.curves.push(
            Curve::new("DEPTH", vec![Some(1.0), Some(2.0)])
                .with_unit("FT")
                .with_description("Measured depth"),
        );
        log.curves.push(Curve::new("GR", vec![Some(3.0), None]).with_unit("GAPI"));

        let table = DepthTable::from_log(&log, CollisionPolicy::KeepLast).unwrap();
        let rebuilt = rebuild_log(&table, &log);

        assert_eq!(rebuilt.mnemonics(), vec!["DEPT", "GR"]);
        assert_eq!(rebuilt.curves[0].unit, "FT");
        assert_eq!(rebuilt.curves[0].description, "Measured depth");
        assert_eq!(rebuilt.curves[1], log.curves[1]);
        assert_eq!(rebuilt.well, log.well);
        assert_eq!(rebuilt.params, log.params);
        assert_eq!(rebuilt.other, log.other);
    }
}

//! Plain-text table layout.

use super::ComparisonResult;
use std::io::{self, Write};

pub(super) fn write_table<W: Write>(result: &ComparisonResult, w: &mut W) -> io::Result<()> {
    writeln!(w, "Comparison Result")?;
    writeln!(w, "{}", "=".repeat(17))?;
    writeln!(w)?;
    writeln!(w, "Source: {}", result.source)?;
    writeln!(w, "Target: {}", result.target)?;
    writeln!(w, "Equal: {}", result.equal)?;
    writeln!(w)?;

    if !result.equal && !result.differences.is_empty() {
        writeln!(w, "Differences:")?;
        writeln!(w, "{}", "-".repeat(12))?;
        for difference in &result.differences {
            writeln!(w, "Path: {}", difference.path)?;
            writeln!(w, "Type: {}", difference.kind)?;
            writeln!(w, "Message: {}", difference.message)?;
            writeln!(w)?;
        }
    }

    let summary = &result.summary;
    writeln!(w, "Summary:")?;
    writeln!(w, "{}", "-".repeat(8))?;
    writeln!(w, "Total Fields: {}", summary.total_fields)?;
    writeln!(w, "Equal Fields: {}", summary.equal_fields)?;
    writeln!(w, "Different Fields: {}", summary.different_fields)?;
    writeln!(w, "Added Fields: {}", summary.added_fields)?;
    writeln!(w, "Removed Fields: {}", summary.removed_fields)?;

    Ok(())
}

//! Parser for the streaming `zpool iostat -v -H -p -y <n>` feed.
//!
//! Scripted iostat emits one tab-separated line per subject per interval:
//! `name  alloc  free  read_ops  write_ops  read_bytes  write_bytes`.
//! Only fields 1, 4, 5, 6 and 7 are used. The format never re-asserts which
//! pool an indented vdev line belongs to, so the leading-whitespace width is
//! captured before splitting; the merge engine resolves subjects from it.

use crate::model::CounterUpdate;
use crate::parse::rows::rows;

/// Parses one line of the counter stream. Returns `None` for header noise,
/// short rows and rows whose counters are not numeric; the stream simply
/// continues with the next line.
pub fn parse_counter_line(line: &str) -> Option<CounterUpdate> {
    let row = rows(line).next()?;

    let fields = row.tab_fields();
    if fields.len() < 7 {
        return None;
    }

    Some(CounterUpdate {
        indent: row.indent(),
        name: fields[0].to_string(),
        read_ops: fields[3].parse().ok()?,
        write_ops: fields[4].parse().ok()?,
        read_bytes: fields[5].parse().ok()?,
        write_bytes: fields[6].parse().ok()?,
    })
}

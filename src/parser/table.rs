use scraper::{ElementRef, Html};
use tracing::debug;

use super::anchor::{is_canonical_date, parse_table_anchor};
use super::html::{element_text, selector};
use super::normalize::{clean_line, non_empty_lines};
use crate::error::ParseError;
use crate::model::RawGroup;

const DATE_HEADER: &str = "Date";
const PROGRAM_HEADER: &str = "Program";

/// Find the "Date & Time" / "Program Details" table and turn each row into a group.
///
/// The header row is skipped; rows with fewer than two cells or an empty date
/// cell are dropped entirely.
pub fn schedule_groups(html: &str) -> Result<Vec<RawGroup>, ParseError> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let th_sel = selector("th")?;
    let tr_sel = selector("tr")?;
    let td_sel = selector("td")?;
    let venue_sel = selector("b, strong")?;

    let table = document
        .select(&table_sel)
        .find(|t| is_schedule_table(*t, &th_sel))
        .ok_or(ParseError::NoScheduleTable)?;

    let mut groups = Vec::new();
    for (row_idx, tr) in table.select(&tr_sel).enumerate().skip(1) {
        let cells: Vec<ElementRef> = tr.select(&td_sel).collect();
        if cells.len() < 2 {
            debug!("Skipping row {} with {} cell(s)", row_idx, cells.len());
            continue;
        }

        let date_lines = non_empty_lines(&element_text(cells[0]));
        let Some(anchor) = parse_table_anchor(&date_lines) else {
            debug!("Skipping row {} with empty date cell", row_idx);
            continue;
        };
        if !is_canonical_date(&anchor.date) {
            debug!("Row {} has non-canonical date '{}'", row_idx, anchor.date);
        }

        let program = cells[1];
        let venue_marker = program
            .select(&venue_sel)
            .next()
            .map(|b| clean_line(&element_text(b)))
            .filter(|v| !v.is_empty());

        groups.push(RawGroup {
            anchor,
            lines: non_empty_lines(&element_text(program)),
            venue_marker,
        });
    }

    Ok(groups)
}

fn is_schedule_table(table: ElementRef<'_>, th_sel: &scraper::Selector) -> bool {
    let mut headers = table.select(th_sel).map(|th| th.text().collect::<String>());
    let first = headers.next().unwrap_or_default();
    let second = headers.next().unwrap_or_default();
    first.contains(DATE_HEADER) && second.contains(PROGRAM_HEADER)
}

//! Table formatting utilities

use prettytable::format::Alignment;
use prettytable::{Cell, Row, Table};

/// Create a table with bold headers
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        headers
            .iter()
            .map(|h| Cell::new(h).style_spec("b"))
            .collect(),
    ));
    table
}

/// Add a row whose first cell is a label and the rest are right-aligned values
pub fn add_table_row<I>(table: &mut Table, label: &str, values: I)
where
    I: IntoIterator<Item = String>,
{
    let mut cells = vec![Cell::new(label)];
    cells.extend(
        values
            .into_iter()
            .map(|value| Cell::new_align(&value, Alignment::RIGHT)),
    );
    table.add_row(Row::new(cells));
}

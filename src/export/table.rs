//! Flattening of product records into a fixed-width table.

use crate::catalog::ProductRecord;

/// Fixed leading columns, in output order.
pub const BASE_COLUMNS: [&str; 9] =
    ["sku", "productId", "name", "price", "currency", "color", "region", "fetchTime", "description"];

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

/// One data row with its 1-based index.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    pub cells: Vec<Cell>,
}

/// Rectangular table: every row has `headers.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Flattens records into rows, spreading images over `image_1..image_N`
/// where N is the largest image count. Shorter rows are padded with empty cells.
pub fn build_table(items: &[ProductRecord]) -> Table {
    let image_columns = items.iter().map(|i| i.images.len()).max().unwrap_or(0);

    let mut headers: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    headers.extend((1..=image_columns).map(|n| format!("image_{}", n)));

    let rows = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut cells = vec![
                Cell::Text(item.sku.clone()),
                Cell::Text(item.product_id.clone()),
                Cell::Text(item.name.clone()),
                Cell::Number(item.price),
                Cell::Text(item.currency.clone()),
                Cell::Text(item.color.clone()),
                Cell::Text(item.region.clone()),
                Cell::Text(item.fetch_time.clone()),
                Cell::Text(item.description.clone()),
            ];
            cells.extend(item.images.iter().map(|url| Cell::Text(url.clone())));
            cells.resize(headers.len(), Cell::Empty);

            Row { index: i + 1, cells }
        })
        .collect();

    Table { headers, rows }
}

//! Menu import from CSV text.
//!
//! The first line is a header naming the columns. `id`, `name`, `price`,
//! `calories`, `diet` and `flavor` are required. `ratings` (semicolon
//! separated), `type`, `preparation_time`, `num_items` and `discount_percent`
//! are optional. Rows that cannot be turned into a valid item are reported
//! and skipped; the rest of the file still loads.

use std::collections::HashMap;

use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;
use mealwise_core::{
    DEFAULT_BUNDLE_DISCOUNT, DEFAULT_BUNDLE_ITEMS, DEFAULT_PREPARATION_MINUTES, MealKind, MenuItem,
};

use crate::{CsvImportError, Menu, RowError};

/// Columns every menu CSV must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = ["id", "name", "price", "calories", "diet", "flavor"];

/// The items that loaded and the rows that did not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuImport {
    /// Valid items in file order.
    pub menu: Menu,
    /// Rejected rows in file order.
    pub errors: Vec<RowError>,
}

/// Parse menu CSV text.
///
/// Blank lines are ignored and surrounding whitespace is trimmed from every
/// field. Row numbers count the header as row 1.
///
/// # Errors
/// Returns [`CsvImportError::MissingColumns`] when required headers are
/// absent and [`CsvImportError::Header`] when the header is unreadable.
///
/// # Examples
/// ```
/// use mealwise_catalog::parse_menu_csv;
///
/// # fn main() -> Result<(), mealwise_catalog::CsvImportError> {
/// let csv = "id,name,price,calories,diet,flavor\n1,Pasta,12.5,550,vegetarian,creamy\n2,Soup,oops,200,vegan,mild";
/// let import = parse_menu_csv(csv)?;
/// assert_eq!(import.menu.len(), 1);
/// assert_eq!(import.errors.first().map(|e| e.row), Some(3));
/// # Ok(())
/// # }
/// ```
pub fn parse_menu_csv(text: &str) -> Result<MenuImport, CsvImportError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|source| CsvImportError::Header { source })?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut menu = Menu::new();
    let mut errors = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 2;
        let added = record
            .map_err(|err| err.to_string())
            .and_then(|record| columns.item(&record))
            .and_then(|item| menu.add(item).map_err(|err| err.to_string()));
        if let Err(message) = added {
            errors.push(row_error(row, message));
        }
    }
    Ok(MenuImport { menu, errors })
}

/// Read and parse a menu CSV file.
///
/// # Errors
/// Returns [`CsvImportError::Io`] when the file cannot be read, otherwise as
/// [`parse_menu_csv`].
pub fn read_menu_csv(path: &Utf8Path) -> Result<MenuImport, CsvImportError> {
    let text = mealwise_fs::read_to_string(path).map_err(|source| CsvImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_menu_csv(&text)
}

fn row_error(row: usize, message: String) -> RowError {
    warn!("skipping menu CSV row {row}: {message}");
    RowError { row, message }
}

/// Header positions resolved once per file.
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, CsvImportError> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(position, name)| (name.to_lowercase(), position))
            .collect();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !index.contains_key(**column))
            .map(|column| (*column).to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(CsvImportError::MissingColumns { missing });
        }
        Ok(Self { index })
    }

    fn field<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
        self.index
            .get(column)
            .and_then(|position| record.get(*position))
            .filter(|value| !value.is_empty())
    }

    fn required<'r>(&self, record: &'r StringRecord, column: &str) -> Result<&'r str, String> {
        self.index
            .get(column)
            .and_then(|position| record.get(*position))
            .ok_or_else(|| format!("missing value for '{column}'"))
    }

    fn item(&self, record: &StringRecord) -> Result<MenuItem, String> {
        let id = self.required(record, "id")?;
        let name = self.required(record, "name")?;
        let price: f64 = parse_number(self.required(record, "price")?, "price")?;
        let calories = parse_calories(self.required(record, "calories")?)?;

        let item = MenuItem::new(id, name, price)
            .map_err(|err| err.to_string())?
            .with_calories(calories)
            .with_diet(self.required(record, "diet")?)
            .with_flavor(self.required(record, "flavor")?)
            .with_kind(self.kind(record)?);
        let ratings = self.ratings(record)?;
        item.with_ratings(ratings).map_err(|err| err.to_string())
    }

    fn ratings(&self, record: &StringRecord) -> Result<Vec<u8>, String> {
        let Some(raw) = self.field(record, "ratings") else {
            return Ok(Vec::new());
        };
        raw.split(';')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| parse_number::<u8>(value, "rating"))
            .collect()
    }

    fn kind(&self, record: &StringRecord) -> Result<MealKind, String> {
        let kind = self.field(record, "type").map(str::to_lowercase);
        match kind.as_deref() {
            None | Some("standard") => Ok(MealKind::Standard),
            Some("specialty") => Ok(MealKind::Specialty {
                preparation_minutes: self
                    .optional(record, "preparation_time")?
                    .unwrap_or(DEFAULT_PREPARATION_MINUTES),
            }),
            Some("bundle") => Ok(MealKind::Bundle {
                num_items: self
                    .optional(record, "num_items")?
                    .unwrap_or(DEFAULT_BUNDLE_ITEMS),
                discount_percent: self
                    .optional(record, "discount_percent")?
                    .unwrap_or(DEFAULT_BUNDLE_DISCOUNT),
            }),
            Some(other) => Err(format!("unknown meal type '{other}'")),
        }
    }

    fn optional<T: std::str::FromStr>(
        &self,
        record: &StringRecord,
        column: &str,
    ) -> Result<Option<T>, String> {
        self.field(record, column)
            .map(|value| parse_number(value, column))
            .transpose()
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, column: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid {column} '{value}'"))
}

/// Accept whole or fractional calorie counts; fractions are truncated.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "range checked before truncating to u32"
)]
fn parse_calories(value: &str) -> Result<u32, String> {
    if let Ok(whole) = value.parse::<u32>() {
        return Ok(whole);
    }
    let number: f64 = parse_number(value, "calories")?;
    if !number.is_finite() || number < 0.0 || number > f64::from(u32::MAX) {
        return Err(format!("invalid calories '{value}'"));
    }
    Ok(number.trunc() as u32)
}

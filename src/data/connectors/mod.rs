mod csv;
mod mtgjson;

pub use self::csv::{CollectionEntry, CsvConnector};
pub use mtgjson::MtgJsonConnector;

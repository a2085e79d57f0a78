pub mod card;
pub mod catalog;
pub mod collection;
pub mod connectors;
pub mod mechanics;

pub use card::CardRecord;
pub use catalog::Catalog;
pub use collection::Collection;
pub use connectors::{CollectionEntry, CsvConnector, MtgJsonConnector};

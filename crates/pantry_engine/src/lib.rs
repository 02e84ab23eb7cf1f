pub mod codec;
pub mod config;
pub mod console;
pub mod filter;
pub mod menu;
pub mod persistence;
pub mod product;
pub mod store;

pub use codec::{
    DecodedQuantity, DecodedRecord, decode_csv_record, decode_csv_record_checked,
    encode_csv_record, read_raw_record,
};
pub use config::{CONFIG_FILE, Config, LoggingConfig, load_config};
pub use console::Console;
pub use filter::{FilterPolicy, expiring_or_expired, low_quantity};
pub use menu::{MenuCommand, Session};
pub use persistence::{PantryFile, load, save, save_filtered};
pub use product::{NO_EXPIRY, Product};
pub use store::{InMemoryStore, ProductStore};

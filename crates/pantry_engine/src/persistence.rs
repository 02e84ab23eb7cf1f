/* 📖 # How are pantry files laid out?

One record per line in the codec's persistence form, nothing else, with one
exception: a low-quantity export may end with an advisory line starting with
`Warnung:`. Loading skips every line with that prefix. A product whose name
itself starts with `Warnung:` is therefore dropped on reload; changing that
would change the file format, so it is left as is.
*/

use std::io::{BufRead, BufReader, Write};

use tracing::{debug, instrument, warn};

use pantry_base::{FilePath, PalHandle, PantryError, PantryResult};

use crate::codec::{DecodedQuantity, decode_csv_record_checked, encode_csv_record};
use crate::product::Product;

/// Lines starting with this prefix are annotations, not records.
pub const ADVISORY_PREFIX: &str = "Warnung:";

/// The three fixed files the menu saves to and loads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PantryFile {
    /// Full pantry.
    Pantry,
    /// Export of expiring or expired products.
    ExpiringOrExpired,
    /// Export of products running low.
    LowQuantity,
}

impl PantryFile {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Pantry => "pantry_data.txt",
            Self::ExpiringOrExpired => "expiring_and_expired_products.txt",
            Self::LowQuantity => "low_quantity_products.txt",
        }
    }

    pub fn path(self) -> FilePath {
        FilePath::from(self.file_name())
    }
}

/// Writes all `products` to `path`, replacing its contents.
///
/// Returns the number of records written.
#[instrument(skip(pal, products), fields(path = %path, count = products.len()))]
pub fn save(pal: &PalHandle, products: &[Product], path: &FilePath) -> PantryResult<usize> {
    write_records(pal, path, products.iter(), None)
}

/// Writes pre-selected `records` to `path`, replacing its contents.
///
/// When `advisory` is given and at least one record was written, it is appended
/// as a final line.
#[instrument(skip(pal, records), fields(path = %path, count = records.len()))]
pub fn save_filtered(
    pal: &PalHandle,
    records: &[&Product],
    path: &FilePath,
    advisory: Option<&str>,
) -> PantryResult<usize> {
    write_records(pal, path, records.iter().copied(), advisory)
}

fn write_records<'a>(
    pal: &PalHandle,
    path: &FilePath,
    records: impl Iterator<Item = &'a Product>,
    advisory: Option<&str>,
) -> PantryResult<usize> {
    let file = pal.create_file(path)?;
    let mut writer = std::io::BufWriter::new(file);
    let write_error = |e: std::io::Error| Box::new(PantryError::file_error(path.as_path(), e));

    let mut written = 0;
    for product in records {
        writer
            .write_all(encode_csv_record(product).as_bytes())
            .map_err(write_error)?;
        written += 1;
    }
    if let Some(advisory) = advisory.filter(|_| written > 0) {
        writeln!(writer, "{}", advisory).map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;

    debug!(written, "records saved");
    Ok(written)
}

/// Reads all records from `path`, skipping advisory lines.
///
/// Bytes that are not valid UTF-8 are replaced, never rejected.
/// Fails only if the file cannot be opened or read; callers keep their current
/// collection in that case. Quantities that cannot be parsed become 0.
#[instrument(skip(pal), fields(path = %path))]
pub fn load(pal: &PalHandle, path: &FilePath) -> PantryResult<Vec<Product>> {
    let reader = BufReader::new(pal.read_file(path)?);
    let mut products = Vec::new();

    for (line_number, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes.map_err(|e| Box::new(PantryError::file_error(path.as_path(), e)))?;
        // Hand-edited files may be Latin-1; undecodable bytes become U+FFFD
        let text = String::from_utf8_lossy(&bytes);
        let line = text.strip_suffix('\r').unwrap_or(&text);
        if line.starts_with(ADVISORY_PREFIX) {
            debug!(line_number, "skipping advisory line");
            continue;
        }
        let decoded = decode_csv_record_checked(line);
        if decoded.quantity == DecodedQuantity::Defaulted {
            warn!(line_number, line = %line, "quantity not readable, using 0");
        }
        products.push(decoded.product);
    }

    debug!(count = products.len(), "records loaded");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{LOW_QUANTITY_ADVISORY, low_quantity};
    use expect_test::expect;
    use pantry_base::{ErrorKind, MockPal};

    fn setup() -> (MockPal, PalHandle) {
        let mock = MockPal::new();
        let pal = PalHandle::new(mock.clone());
        (mock, pal)
    }

    fn sample() -> Vec<Product> {
        vec![
            Product::new("Milk", "05.03.2025", 2),
            Product::new("Rice", "keines", 50),
            Product::new("Eggs", "10.03.2025", 5),
        ]
    }

    #[test]
    fn test_save_writes_one_line_per_record() {
        let (mock, pal) = setup();
        let path = PantryFile::Pantry.path();

        assert_eq!(save(&pal, &sample(), &path).unwrap(), 3);
        expect![[r#"
            Milk,05.03.2025,2
            Rice,keines,50
            Eggs,10.03.2025,5
        "#]]
        .assert_eq(&mock.file_contents(&path).unwrap());
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let (mock, pal) = setup();
        let path = PantryFile::Pantry.path();
        mock.add_file(path.clone(), b"Old,keines,1\nOlder,keines,2\n".to_vec());

        save(&pal, &sample()[..1], &path).unwrap();
        assert_eq!(mock.file_contents(&path).unwrap(), "Milk,05.03.2025,2\n");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_mock, pal) = setup();
        let path = PantryFile::Pantry.path();

        save(&pal, &sample(), &path).unwrap();
        assert_eq!(load(&pal, &path).unwrap(), sample());
    }

    #[test]
    fn test_save_filtered_appends_advisory_when_non_empty() {
        let (mock, pal) = setup();
        let path = PantryFile::LowQuantity.path();
        let products = sample();

        let written =
            save_filtered(&pal, &low_quantity(&products), &path, Some(LOW_QUANTITY_ADVISORY))
                .unwrap();

        assert_eq!(written, 2);
        expect![[r#"
            Milk,05.03.2025,2
            Eggs,10.03.2025,5
            Warnung: Alles nur 5 oder weniger
        "#]]
        .assert_eq(&mock.file_contents(&path).unwrap());
    }

    #[test]
    fn test_save_filtered_empty_has_no_advisory() {
        let (mock, pal) = setup();
        let path = PantryFile::LowQuantity.path();

        save_filtered(&pal, &[], &path, Some(LOW_QUANTITY_ADVISORY)).unwrap();
        assert_eq!(mock.file_contents(&path).unwrap(), "");
    }

    #[test]
    fn test_load_skips_advisory_lines() {
        let (mock, pal) = setup();
        let path = PantryFile::LowQuantity.path();
        mock.add_file(
            path.clone(),
            b"Milk,05.03.2025,2\nWarnung: Alles nur 5 oder weniger\n".to_vec(),
        );

        assert_eq!(
            load(&pal, &path).unwrap(),
            vec![Product::new("Milk", "05.03.2025", 2)]
        );
    }

    #[test]
    fn test_load_only_skips_prefix_at_line_start() {
        let (mock, pal) = setup();
        let path = PantryFile::Pantry.path();
        mock.add_file(path.clone(), b" Warnung: Tee,keines,3\n".to_vec());

        let products = load(&pal, &path).unwrap();
        assert_eq!(products, vec![Product::new("Warnung: Tee", "keines", 3)]);
    }

    #[test]
    fn test_load_defaults_garbled_quantity() {
        let (mock, pal) = setup();
        let path = PantryFile::Pantry.path();
        mock.add_file(path.clone(), b"Milk,05.03.2025,viel\r\n".to_vec());

        assert_eq!(
            load(&pal, &path).unwrap(),
            vec![Product::new("Milk", "05.03.2025", 0)]
        );
    }

    #[test]
    fn test_load_accepts_latin1_bytes() {
        let (mock, pal) = setup();
        let path = PantryFile::Pantry.path();
        mock.add_file(
            path.clone(),
            b"Milk,05.03.2025,2\nK\xE4se,keines,3\n".to_vec(),
        );

        assert_eq!(
            load(&pal, &path).unwrap(),
            vec![
                Product::new("Milk", "05.03.2025", 2),
                Product::new("K\u{FFFD}se", "keines", 3),
            ]
        );
    }

    #[test]
    fn test_load_missing_file_is_file_error() {
        let (_mock, pal) = setup();

        let err = load(&pal, &PantryFile::ExpiringOrExpired.path()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::FileError { .. }));
    }

    #[test]
    fn test_save_to_unwritable_file_fails() {
        let (mock, pal) = setup();
        let path = PantryFile::Pantry.path();
        mock.fail_on(path.clone());

        assert!(save(&pal, &sample(), &path).is_err());
    }

    #[test]
    fn test_well_known_file_names() {
        assert_eq!(PantryFile::Pantry.file_name(), "pantry_data.txt");
        assert_eq!(
            PantryFile::ExpiringOrExpired.file_name(),
            "expiring_and_expired_products.txt"
        );
        assert_eq!(
            PantryFile::LowQuantity.file_name(),
            "low_quantity_products.txt"
        );
    }
}

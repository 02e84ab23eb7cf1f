/* 📖 # Why is the record format so loose?

Pantry files are plain `name,expirydate,quantity` lines that users may edit by hand.
Decoding never fails: a missing or garbled quantity becomes 0, the same way
stream extraction leaves a number untouched when it cannot parse it.
Commas inside fields are not escaped, so a name containing a comma will not
survive a save and reload.
*/

use std::io::BufRead;

use tracing::warn;

use pantry_base::{PantryError, PantryResult};

use crate::product::Product;

/// Whether the quantity of a decoded record was read from the line or defaulted to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedQuantity {
    Parsed,
    Defaulted,
}

/// A decoded record together with how its quantity was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub product: Product,
    pub quantity: DecodedQuantity,
}

/// Persistence form of a record, including the trailing newline.
pub fn encode_csv_record(product: &Product) -> String {
    format!(
        "{},{},{}\n",
        product.name, product.expiry_date, product.quantity
    )
}

/// Decodes one persistence-form line, defaulting the quantity to 0 when it cannot be read.
pub fn decode_csv_record(line: &str) -> Product {
    decode_csv_record_checked(line).product
}

/// Decodes one persistence-form line and reports whether the quantity was defaulted.
///
/// Leading whitespace before each field is skipped. The name runs up to the first
/// comma, the expiry date up to the next one, and the quantity is the leading
/// integer of the remainder. A line without any comma is taken as a bare name.
pub fn decode_csv_record_checked(line: &str) -> DecodedRecord {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let mut product = Product::default();

    let (name, rest) = split_field(line);
    product.name = name.to_string();
    let Some(rest) = rest else {
        return DecodedRecord {
            product,
            quantity: DecodedQuantity::Defaulted,
        };
    };

    let (expiry_date, rest) = split_field(rest);
    product.expiry_date = expiry_date.to_string();

    let quantity = match rest.and_then(parse_leading_integer) {
        Some(quantity) => {
            product.quantity = quantity;
            DecodedQuantity::Parsed
        }
        None => DecodedQuantity::Defaulted,
    };
    DecodedRecord { product, quantity }
}

/// Reads a record in raw line form: name, expiry date and quantity on three lines.
///
/// Returns `Ok(None)` at end of input. The quantity line follows the same
/// defaulting rule as [`decode_csv_record`].
pub fn read_raw_record(reader: &mut impl BufRead) -> PantryResult<Option<Product>> {
    let mut name = String::new();
    if read_line(reader, &mut name)? == 0 {
        return Ok(None);
    }
    let mut expiry_date = String::new();
    read_line(reader, &mut expiry_date)?;
    let mut quantity_line = String::new();
    read_line(reader, &mut quantity_line)?;

    let quantity = parse_leading_integer(&quantity_line).unwrap_or_else(|| {
        warn!(line = %quantity_line.trim_end(), "quantity not readable, using 0");
        0
    });
    Ok(Some(Product::new(
        trim_line_ending(&name),
        trim_line_ending(&expiry_date),
        quantity,
    )))
}

fn read_line(reader: &mut impl BufRead, buffer: &mut String) -> PantryResult<usize> {
    let mut bytes = Vec::new();
    let read = reader
        .read_until(b'\n', &mut bytes)
        .map_err(|e| Box::new(PantryError::message(format!("Failed to read record: {}", e))))?;
    buffer.push_str(&String::from_utf8_lossy(&bytes));
    Ok(read)
}

fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Skips leading whitespace, then splits at the first comma.
/// Returns `None` for the remainder when there is no comma.
fn split_field(input: &str) -> (&str, Option<&str>) {
    let input = input.trim_start();
    match input.split_once(',') {
        Some((field, rest)) => (field, Some(rest)),
        None => (input, None),
    }
}

/// Reads an optionally signed integer at the start of `field`, ignoring anything after it.
fn parse_leading_integer(field: &str) -> Option<i64> {
    let field = field.trim_start();
    let sign_len = usize::from(field.starts_with(['+', '-']));
    let digit_count = field[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digit_count == 0 {
        return None;
    }
    field[..sign_len + digit_count].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_encode() {
        let product = Product::new("Milk", "05.03.2025", 2);
        assert_eq!(encode_csv_record(&product), "Milk,05.03.2025,2\n");
    }

    #[test]
    fn test_decode_full_record() {
        let decoded = decode_csv_record_checked("Milk,05.03.2025,2");
        assert_eq!(decoded.product, Product::new("Milk", "05.03.2025", 2));
        assert_eq!(decoded.quantity, DecodedQuantity::Parsed);
    }

    #[test]
    fn test_round_trip_without_commas() {
        let products = [
            Product::new("Milk", "05.03.2025", 2),
            Product::new("Rice", "keines", 50),
            Product::new("Whole Wheat Flour", "", 0),
            Product::new("Eggs", "31.12.2030", 12_000),
        ];
        for product in products {
            assert_eq!(decode_csv_record(&encode_csv_record(&product)), product);
        }
    }

    #[test]
    fn test_decode_skips_leading_whitespace_per_field() {
        let product = decode_csv_record("  Milk,  05.03.2025,   7");
        assert_eq!(product, Product::new("Milk", "05.03.2025", 7));
    }

    #[test]
    fn test_decode_unparsable_quantity_defaults_to_zero() {
        let decoded = decode_csv_record_checked("Milk,05.03.2025,lots");
        assert_eq!(decoded.product, Product::new("Milk", "05.03.2025", 0));
        assert_eq!(decoded.quantity, DecodedQuantity::Defaulted);
    }

    #[test]
    fn test_decode_quantity_ignores_trailing_garbage() {
        assert_eq!(decode_csv_record("Milk,x,12 packs").quantity, 12);
        assert_eq!(decode_csv_record("Milk,x,3\r").quantity, 3);
        assert_eq!(decode_csv_record("Milk,x,-4").quantity, -4);
    }

    #[test]
    fn test_decode_extra_commas_end_up_in_quantity_field() {
        let decoded = decode_csv_record_checked("Milk, whole,05.03.2025,2");
        assert_eq!(decoded.product.name, "Milk");
        assert_eq!(decoded.product.expiry_date, "whole");
        // "05.03.2025,2" yields its leading integer
        assert_eq!(decoded.product.quantity, 5);
        assert_eq!(decoded.quantity, DecodedQuantity::Parsed);

        let decoded = decode_csv_record_checked("Milk, whole,keines,2");
        assert_eq!(decoded.product.quantity, 0);
        assert_eq!(decoded.quantity, DecodedQuantity::Defaulted);
    }

    #[test]
    fn test_decode_line_without_comma_is_bare_name() {
        let decoded = decode_csv_record_checked("Just a name");
        assert_eq!(decoded.product, Product::new("Just a name", "", 0));
        assert_eq!(decoded.quantity, DecodedQuantity::Defaulted);
    }

    #[test]
    fn test_decode_empty_line() {
        assert_eq!(decode_csv_record(""), Product::default());
    }

    #[test]
    fn test_read_raw_record() {
        let mut input = Cursor::new("Milk\n05.03.2025\n2\nRice\nkeines\n50\n");
        assert_eq!(
            read_raw_record(&mut input).unwrap(),
            Some(Product::new("Milk", "05.03.2025", 2))
        );
        assert_eq!(
            read_raw_record(&mut input).unwrap(),
            Some(Product::new("Rice", "keines", 50))
        );
        assert_eq!(read_raw_record(&mut input).unwrap(), None);
    }

    #[test]
    fn test_read_raw_record_truncated() {
        let mut input = Cursor::new("Milk\n05.03.2025\n");
        assert_eq!(
            read_raw_record(&mut input).unwrap(),
            Some(Product::new("Milk", "05.03.2025", 0))
        );
    }

    #[test]
    fn test_read_raw_record_keeps_latin1_name() {
        let mut input = Cursor::new(b"K\xE4se\nkeines\n3\n".to_vec());
        assert_eq!(
            read_raw_record(&mut input).unwrap(),
            Some(Product::new("K\u{FFFD}se", "keines", 3))
        );
    }
}

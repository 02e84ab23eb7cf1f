/* 📖 # How does the menu loop work?

The session prints the numbered menu, reads one choice and runs the matching
command to completion before showing the menu again. Nothing a user types can
end the loop except choice 11 (or the end of input): bad choices, bad indices,
unreadable numbers and file errors are reported and the menu comes back.

Products are numbered from 1 on screen. Those numbers are converted to 0-based
store indices here and nowhere else.
*/

use tracing::{debug, info, instrument, warn};

use pantry_base::{PalHandle, PantryResult};

use crate::console::Console;
use crate::filter::FilterPolicy;
use crate::persistence::{self, PantryFile};
use crate::product::Product;
use crate::store::ProductStore;

/// Typed in place of a name or expiry date to abort adding a product.
pub const CANCEL: &str = "cancel";

pub const MENU_TEXT: &str = "\n\nMenü:
1. Alle Produkte anzeigen
2. Neues Produkt hinzufügen
3. Produkt bearbeiten
4. Produkt entfernen
5. Alle Daten speichern
6. Produkte mit Ablaufdatum oder bereits abgelaufen speichern
7. Produkte mit Menge von 5 oder weniger speichern
8. Daten laden
9. Daten von Ablaufdatum oder bereits abgelaufenen Produkten laden
10. Daten von Produkten mit geringer Menge laden
11. Beenden

";

pub const PROMPT: &str = "Ihre Auswahl: ";
const INVALID_CHOICE: &str = "Ungültige Auswahl. Bitte erneut versuchen.";
const CANCELLED: &str = "Prozess wurde abgebrochen.";
const FILE_OPEN_FAILED: &str = "Fehler beim Öffnen der Datei.";

/// A menu entry, numbered 1 to 11 on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    DisplayAll,
    Add,
    Edit,
    Remove,
    SaveAll,
    SaveExpiringOrExpired,
    SaveLowQuantity,
    LoadAll,
    LoadExpiringOrExpired,
    LoadLowQuantity,
    Exit,
}

impl MenuCommand {
    pub fn from_choice(choice: i64) -> Option<Self> {
        let command = match choice {
            1 => Self::DisplayAll,
            2 => Self::Add,
            3 => Self::Edit,
            4 => Self::Remove,
            5 => Self::SaveAll,
            6 => Self::SaveExpiringOrExpired,
            7 => Self::SaveLowQuantity,
            8 => Self::LoadAll,
            9 => Self::LoadExpiringOrExpired,
            10 => Self::LoadLowQuantity,
            11 => Self::Exit,
            _ => return None,
        };
        Some(command)
    }

    /// Parses a typed menu choice. Anything but an integer from 1 to 11 is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse().ok().and_then(Self::from_choice)
    }
}

/// Whether the loop should go on after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One interactive run over a product store.
pub struct Session<S: ProductStore> {
    store: S,
    pal: PalHandle,
    console: Console,
}

impl<S: ProductStore> Session<S> {
    pub fn new(store: S, pal: PalHandle, console: Console) -> Self {
        Self {
            store,
            pal,
            console,
        }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// Only console I/O failures are returned as errors; everything else is
    /// reported to the user and the loop continues.
    pub fn run(&mut self) -> PantryResult<()> {
        loop {
            self.console.write(MENU_TEXT)?;
            self.console.write(PROMPT)?;

            let Some(choice) = self.console.next_token()? else {
                info!("end of input, leaving menu");
                return Ok(());
            };
            let Some(command) = MenuCommand::parse(&choice) else {
                debug!(choice = %choice, "invalid menu choice");
                self.console.discard_line();
                self.console.line(INVALID_CHOICE)?;
                continue;
            };
            if self.execute(command)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Runs a single command.
    #[instrument(skip(self))]
    pub fn execute(&mut self, command: MenuCommand) -> PantryResult<Flow> {
        match command {
            MenuCommand::DisplayAll => self.display_products()?,
            MenuCommand::Add => self.add_product()?,
            MenuCommand::Edit => self.edit_product()?,
            MenuCommand::Remove => self.remove_products()?,
            MenuCommand::SaveAll => self.save_all()?,
            MenuCommand::SaveExpiringOrExpired => self.save_expiring_or_expired()?,
            MenuCommand::SaveLowQuantity => self.save_low_quantity()?,
            MenuCommand::LoadAll => self.load_from(PantryFile::Pantry)?,
            MenuCommand::LoadExpiringOrExpired => self.load_from(PantryFile::ExpiringOrExpired)?,
            MenuCommand::LoadLowQuantity => self.load_from(PantryFile::LowQuantity)?,
            MenuCommand::Exit => {
                self.console.line("Programm wird beendet.")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    pub fn display_products(&mut self) -> PantryResult<()> {
        self.list_products()
    }

    fn list_products(&mut self) -> PantryResult<()> {
        self.console.line("Produkte in der Vorratskammer:")?;
        for (index, product) in self.store.products().iter().enumerate() {
            self.console.line(format_args!("{}. {}", index + 1, product))?;
        }
        Ok(())
    }

    pub fn add_product(&mut self) -> PantryResult<()> {
        self.console.line("Neuer Produkteintrag")?;

        self.console
            .line("Geben Sie das Produkt ein (oder 'cancel' zum Abbrechen):")?;
        let Some(name) = self.read_field_or_cancel()? else {
            return Ok(());
        };

        self.console
            .line("Geben Sie das Ablaufdatum ein (oder 'cancel' zum Abbrechen):")?;
        let Some(expiry_date) = self.read_field_or_cancel()? else {
            return Ok(());
        };

        self.console
            .line("Geben Sie die Menge ein (oder 'cancel' zum Abbrechen):")?;
        let Some(quantity) = self.read_quantity()? else {
            self.console
                .line("Ungültige Eingabe für Menge. Prozess wurde abgebrochen.")?;
            return Ok(());
        };

        self.store.push(Product::new(name, expiry_date, quantity));
        self.console.line("Neues Produkt hinzugefügt")?;
        Ok(())
    }

    pub fn edit_product(&mut self) -> PantryResult<()> {
        if self.store.is_empty() {
            self.console
                .line("Die Vorratskammer ist leer. Keine Produkte zum Bearbeiten.")?;
            return Ok(());
        }
        self.list_products()?;

        self.console
            .line("Geben Sie die Nummer des zu bearbeitenden Produkts ein:")?;
        let Some(index) = self.read_product_number()? else {
            self.console
                .line("Ungültige Auswahl. Produkt wurde nicht bearbeitet.")?;
            return Ok(());
        };

        let current = self.store.get(index)?.quantity;
        self.console
            .line(format_args!("Aktuelle Menge für Produkt {}:", index + 1))?;
        self.console.line(format_args!("Menge: {}", current))?;

        self.console.line("Neue Menge eingeben:")?;
        let Some(quantity) = self.read_quantity()? else {
            self.console
                .line("Ungültige Eingabe für Menge. Produkt wurde nicht bearbeitet.")?;
            return Ok(());
        };

        self.store.set_quantity(index, quantity)?;
        self.console.line("Menge erfolgreich bearbeitet.")?;
        Ok(())
    }

    pub fn remove_products(&mut self) -> PantryResult<()> {
        if self.store.is_empty() {
            self.console
                .line("Die Vorratskammer ist leer. Keine Produkte zum Entfernen.")?;
            return Ok(());
        }
        self.list_products()?;

        self.console.line(
            "Geben Sie die Nummern der zu entfernenden Produkte ein (getrennt durch Komma und Leerzeichen), dann Enter drücken:",
        )?;
        let input = self.console.next_field()?.unwrap_or_default();

        // Numbers past the end come back from the store as rejected
        let mut indices = Vec::new();
        for entry in input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|entry| !entry.is_empty())
        {
            match entry.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                Some(index) => indices.push(index),
                None => self.report_invalid_entry(entry)?,
            }
        }

        let outcome = self.store.remove_many(&indices);
        for index in &outcome.rejected {
            self.report_invalid_entry(index + 1)?;
        }
        debug!(
            removed = outcome.removed.len(),
            rejected = outcome.rejected.len(),
            "products removed"
        );
        self.console.line("Produkte erfolgreich entfernt.")?;
        Ok(())
    }

    fn report_invalid_entry(&mut self, entry: impl std::fmt::Display) -> PantryResult<()> {
        self.console.line(format_args!(
            "Ungültige Auswahl: {}. Bitte erneut versuchen.",
            entry
        ))
    }

    pub fn save_all(&mut self) -> PantryResult<()> {
        let path = PantryFile::Pantry.path();
        match persistence::save(&self.pal, self.store.products(), &path) {
            Ok(_) => self.console.line("Daten erfolgreich gespeichert."),
            Err(e) => {
                warn!(error = %e, "saving pantry failed");
                self.console.error_line(FILE_OPEN_FAILED)
            }
        }
    }

    pub fn save_expiring_or_expired(&mut self) -> PantryResult<()> {
        let policy = FilterPolicy::ExpiringOrExpired { now: self.pal.now() };
        if self.save_selection(policy, PantryFile::ExpiringOrExpired)? {
            self.console.line(
                "Produkte mit Ablaufdatum in den nächsten 7 Tagen oder bereits abgelaufen erfolgreich gespeichert.",
            )?;
        }
        Ok(())
    }

    pub fn save_low_quantity(&mut self) -> PantryResult<()> {
        if self.save_selection(FilterPolicy::LowQuantity, PantryFile::LowQuantity)? {
            self.console
                .line("Produkte mit Menge von 5 oder weniger erfolgreich gespeichert.")?;
        }
        Ok(())
    }

    /// Writes the products selected by `policy`. A file error is reported and yields `false`.
    fn save_selection(&mut self, policy: FilterPolicy, file: PantryFile) -> PantryResult<bool> {
        let selected = policy.select(self.store.products());
        match persistence::save_filtered(&self.pal, &selected, &file.path(), policy.advisory()) {
            Ok(written) => {
                debug!(written, file = file.file_name(), "export written");
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, file = file.file_name(), "export failed");
                self.console.error_line(FILE_OPEN_FAILED)?;
                Ok(false)
            }
        }
    }

    /// Replaces the pantry with the contents of `file`; leaves it untouched if the file cannot be read.
    pub fn load_from(&mut self, file: PantryFile) -> PantryResult<()> {
        match persistence::load(&self.pal, &file.path()) {
            Ok(products) => {
                self.store.replace_all(products);
                self.console.line("Daten erfolgreich geladen.")
            }
            Err(e) => {
                warn!(error = %e, file = file.file_name(), "loading failed");
                self.console.error_line(FILE_OPEN_FAILED)
            }
        }
    }

    /// Reads a name or date. `None` when the user cancels or input ends.
    fn read_field_or_cancel(&mut self) -> PantryResult<Option<String>> {
        match self.console.next_field()? {
            Some(field) if field.trim() != CANCEL => Ok(Some(field.trim().to_string())),
            _ => {
                self.console.line(CANCELLED)?;
                Ok(None)
            }
        }
    }

    /// Reads a non-negative quantity. On anything else the rest of the line is dropped.
    fn read_quantity(&mut self) -> PantryResult<Option<i64>> {
        let quantity = self
            .console
            .next_token()?
            .and_then(|token| token.parse::<i64>().ok())
            .filter(|quantity| *quantity >= 0);
        if quantity.is_none() {
            self.console.discard_line();
        }
        Ok(quantity)
    }

    /// Reads a 1-based product number and returns the 0-based index, if it is in range.
    fn read_product_number(&mut self) -> PantryResult<Option<usize>> {
        let len = self.store.len();
        let index = self
            .console
            .next_token()?
            .and_then(|token| parse_product_number(&token, len));
        if index.is_none() {
            self.console.discard_line();
        }
        Ok(index)
    }
}

/// Converts a 1-based product number typed by the user into a 0-based index below `len`.
pub fn parse_product_number(input: &str, len: usize) -> Option<usize> {
    let number: usize = input.trim().parse().ok()?;
    (1..=len).contains(&number).then(|| number - 1)
}

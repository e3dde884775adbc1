//! The interactive menu loop.
//!
//! Generic over its input and output so it can be driven from a script in
//! tests as well as from a terminal.

use std::io::{self, BufRead, Write};

use stockfile_inventory::{InventoryError, InventoryStore, Price, Product, ProductUpdate};
use thiserror::Error;

const MENU: &str = "\n--- Inventory Management ---\n\
1. Add product\n\
2. Remove product\n\
3. Update product\n\
4. Search products by name\n\
5. List all products\n\
6. Exit";

/// User input rejected before it reaches the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} cannot be blank")]
    Blank(&'static str),

    #[error("{0} cannot contain ';' or line breaks")]
    Separator(&'static str),

    #[error("quantity must be a whole number of zero or more")]
    Quantity,

    #[error("price must be a decimal number")]
    Price,
}

/// Validate a free-text field that will be written into the file.
pub fn parse_text(label: &'static str, raw: &str) -> Result<String, InputError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(InputError::Blank(label));
    }
    if value.contains([';', '\n', '\r']) {
        return Err(InputError::Separator(label));
    }
    Ok(value.to_string())
}

pub fn parse_quantity(raw: &str) -> Result<i64, InputError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::Quantity);
    }
    raw.parse().map_err(|_| InputError::Quantity)
}

pub fn parse_price(raw: &str) -> Result<Price, InputError> {
    raw.parse().map_err(|_| InputError::Price)
}

fn parse_product(id: &str, name: &str, quantity: &str, price: &str) -> Result<Product, InputError> {
    Ok(Product::new(
        parse_text("product ID", id)?,
        parse_text("product name", name)?,
        parse_quantity(quantity)?,
        parse_price(price)?,
    ))
}

/// `None` when the answer is blank ("leave unchanged").
fn optional<T>(
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, InputError>,
) -> Result<Option<T>, InputError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse(raw).map(Some)
    }
}

enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'s, R, W> {
    store: &'s mut InventoryStore,
    input: R,
    output: W,
}

impl<'s, R: BufRead, W: Write> Menu<'s, R, W> {
    pub fn new(store: &'s mut InventoryStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Loop until the user picks "Exit" or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.ask("Select an option: ")? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.add()?,
                "2" => self.remove()?,
                "3" => self.update()?,
                "4" => self.search()?,
                "5" => self.list()?,
                "6" => Flow::Exit,
                _ => {
                    writeln!(self.output, "[ERROR] Invalid option. Try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        writeln!(self.output, "[INFO] Leaving the system.")?;
        self.output.flush()
    }

    fn add(&mut self) -> io::Result<Flow> {
        let Some(id) = self.ask("Product ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.ask("Product name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.ask("Quantity: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(price) = self.ask("Price: ")? else {
            return Ok(Flow::Exit);
        };

        match parse_product(&id, &name, &quantity, &price) {
            Ok(product) => {
                let result = self.store.add(product);
                self.report(result)?;
            }
            Err(e) => writeln!(self.output, "[ERROR] {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn remove(&mut self) -> io::Result<Flow> {
        let Some(id) = self.ask("ID of the product to remove: ")? else {
            return Ok(Flow::Exit);
        };
        let result = self.store.remove(id.trim());
        self.report(result)?;
        Ok(Flow::Continue)
    }

    fn update(&mut self) -> io::Result<Flow> {
        let Some(id) = self.ask("ID of the product to update: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(quantity) = self.ask("New quantity (blank to keep): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(price) = self.ask("New price (blank to keep): ")? else {
            return Ok(Flow::Exit);
        };

        let update = optional(&quantity, parse_quantity).and_then(|quantity| {
            Ok(ProductUpdate {
                quantity,
                price: optional(&price, parse_price)?,
            })
        });

        match update {
            Ok(update) => {
                let result = self.store.update(id.trim(), update);
                self.report(result)?;
            }
            Err(e) => writeln!(self.output, "[ERROR] {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> io::Result<Flow> {
        let Some(needle) = self.ask("Name to search for: ")? else {
            return Ok(Flow::Exit);
        };

        let found = self.store.find_by_name(needle.trim());
        if found.is_empty() {
            writeln!(self.output, "[INFO] No products matched that name.")?;
        }
        for product in found {
            writeln!(self.output, "{product}")?;
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> io::Result<Flow> {
        let listing = self.store.list_all();
        if listing.is_empty() {
            writeln!(self.output, "[INFO] {listing}")?;
        } else {
            writeln!(self.output, "{listing}")?;
        }
        Ok(Flow::Continue)
    }

    fn report<T: core::fmt::Display>(&mut self, result: Result<T, InventoryError>) -> io::Result<()> {
        match result {
            Ok(ack) => writeln!(self.output, "[OK] {ack}"),
            Err(e) => writeln!(self.output, "[ERROR] {e}"),
        }
    }

    /// Print `prompt` and read one line. `None` on end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

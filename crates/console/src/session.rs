//! Interactive loop: menu, prompts, manager calls, result messages.

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, info};

use ims_core::{DomainResult, Money, ProductId};
use ims_inventory::{InventoryManager, Listing, Product};

use crate::config::ConsoleConfig;
use crate::format::{format_currency, inventory_table};
use crate::input::{Console, InputError, parse_id, parse_price, parse_quantity};
use crate::menu::{self, MenuChoice};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// One operator session over an owned inventory.
pub struct Session<R, W> {
    console: Console<R, W>,
    inventory: InventoryManager,
    config: ConsoleConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, config: ConsoleConfig) -> Self {
        Self::with_inventory(reader, writer, config, InventoryManager::new())
    }

    pub fn with_inventory(
        reader: R,
        writer: W,
        config: ConsoleConfig,
        inventory: InventoryManager,
    ) -> Self {
        Self {
            console: Console::new(reader, writer),
            inventory,
            config,
        }
    }

    pub fn inventory(&self) -> &InventoryManager {
        &self.inventory
    }

    /// Hand back the output sink and the final inventory.
    pub fn into_parts(self) -> (W, InventoryManager) {
        (self.console.into_writer(), self.inventory)
    }

    /// Run until the operator exits or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        menu::write_banner(self.console.writer()).context("failed to write banner")?;

        match self.run_loop() {
            Ok(()) | Err(InputError::Closed) => {
                info!(products = self.inventory.len(), "session ended");
                Ok(())
            }
            Err(err) => Err(err).context("console I/O failed"),
        }
    }

    fn run_loop(&mut self) -> Result<(), InputError> {
        loop {
            if self.config.clear_screen {
                write!(self.console.writer(), "{CLEAR_SCREEN}")?;
            }
            menu::write_menu(self.console.writer())?;

            let line = self.console.read_line()?;
            match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    self.console.say("Exiting the system...")?;
                    return Ok(());
                }
                Some(choice) => {
                    debug!(?choice, "menu choice");
                    self.dispatch(choice)?;
                }
                None => self.console.say("Invalid choice. Please try again.")?,
            }

            self.console.prompt("\nPress Enter to continue...")?;
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<(), InputError> {
        match choice {
            MenuChoice::AddProduct => self.add_product(),
            MenuChoice::RemoveProduct => self.remove_product(),
            MenuChoice::UpdateQuantity => self.update_quantity(),
            MenuChoice::ListProducts => self.list_products(),
            MenuChoice::TotalValue => self.show_total(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn heading(&mut self, title: &str) -> Result<(), InputError> {
        self.console.say(format!("\n{title}"))?;
        self.console.say("-".repeat(title.len()))
    }

    fn add_product(&mut self) -> Result<(), InputError> {
        self.heading("Add New Product")?;
        let read = self.read_new_product();
        let Some(product) =
            self.unless_malformed(read, "Invalid input format. Please enter numbers where required.")?
        else {
            return Ok(());
        };

        let outcome = self.inventory.add(product);
        self.report(
            outcome,
            "Product added successfully!",
            "Failed to add product. Check your inputs (ID must be unique and positive, quantity and price must be non-negative).",
        )
    }

    fn read_new_product(&mut self) -> Result<Product, InputError> {
        let id = parse_id(&self.console.prompt("Enter Product ID (positive integer): ")?)?;
        let name = self.console.prompt("Enter Product Name: ")?;
        let quantity = parse_quantity(
            &self
                .console
                .prompt("Enter Quantity in Stock (non-negative integer): ")?,
        )?;
        let price = parse_price(
            &self.console.prompt("Enter Price (non-negative number): ")?,
            &self.config.currency_symbol,
        )?;
        Ok(Product::new(id, name, quantity, price))
    }

    fn remove_product(&mut self) -> Result<(), InputError> {
        self.heading("Remove Product")?;
        let read = self
            .console
            .prompt("Enter Product ID to remove: ")
            .and_then(|text| parse_id(&text));
        let Some(id) = self.unless_malformed(read, "Invalid input. Please enter a valid product ID.")?
        else {
            return Ok(());
        };

        let outcome = self.inventory.remove(id);
        self.report(
            outcome,
            "Product removed successfully!",
            "Product not found or invalid ID.",
        )
    }

    fn update_quantity(&mut self) -> Result<(), InputError> {
        self.heading("Update Product Quantity")?;
        let read = self.read_quantity_update();
        let Some((id, quantity)) =
            self.unless_malformed(read, "Invalid input. Please enter valid numbers.")?
        else {
            return Ok(());
        };

        let outcome = self.inventory.update_quantity(id, quantity);
        self.report(
            outcome,
            "Product quantity updated successfully!",
            "Product not found or invalid quantity.",
        )
    }

    fn read_quantity_update(&mut self) -> Result<(ProductId, i32), InputError> {
        let id = parse_id(&self.console.prompt("Enter Product ID to update: ")?)?;
        let quantity = parse_quantity(
            &self
                .console
                .prompt("Enter New Quantity (non-negative integer): ")?,
        )?;
        Ok((id, quantity))
    }

    fn list_products(&mut self) -> Result<(), InputError> {
        match self.inventory.list() {
            Listing::Empty => self.console.say("Inventory is empty."),
            Listing::Products(rows) => {
                self.console.say("\nCurrent Inventory:")?;
                let table = inventory_table(&rows, &self.config.currency_symbol);
                write!(self.console.writer(), "{table}")?;
                Ok(())
            }
        }
    }

    fn show_total(&mut self) -> Result<(), InputError> {
        let total: Money = self.inventory.total_inventory_value();
        let rendered = format_currency(total, &self.config.currency_symbol);
        self.console.say(format!("\nTotal Inventory Value: {rendered}"))
    }

    /// Turn a parse failure into an operator message; other errors pass through.
    fn unless_malformed<T>(
        &mut self,
        read: Result<T, InputError>,
        message: &str,
    ) -> Result<Option<T>, InputError> {
        match read {
            Ok(value) => Ok(Some(value)),
            Err(InputError::InvalidFormat { field, input }) => {
                debug!(field, input = %input, "malformed operator input");
                self.console.say(message)?;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn report(
        &mut self,
        outcome: DomainResult<()>,
        success: &str,
        rejected: &str,
    ) -> Result<(), InputError> {
        match outcome {
            Ok(()) => self.console.say(success),
            Err(err) => {
                debug!(%err, "operation rejected");
                self.console.say(rejected)
            }
        }
    }
}

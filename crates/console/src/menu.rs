//! Main menu.

use std::io::{self, Write};

pub const TITLE: &str = "Retail Store Inventory Management System";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    AddProduct,
    RemoveProduct,
    UpdateQuantity,
    ListProducts,
    TotalValue,
    Exit,
}

impl MenuChoice {
    /// Menu order.
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::AddProduct,
        MenuChoice::RemoveProduct,
        MenuChoice::UpdateQuantity,
        MenuChoice::ListProducts,
        MenuChoice::TotalValue,
        MenuChoice::Exit,
    ];

    pub fn key(self) -> char {
        match self {
            MenuChoice::AddProduct => '1',
            MenuChoice::RemoveProduct => '2',
            MenuChoice::UpdateQuantity => '3',
            MenuChoice::ListProducts => '4',
            MenuChoice::TotalValue => '5',
            MenuChoice::Exit => '6',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddProduct => "Add Product",
            MenuChoice::RemoveProduct => "Remove Product",
            MenuChoice::UpdateQuantity => "Update Product Quantity",
            MenuChoice::ListProducts => "List All Products",
            MenuChoice::TotalValue => "Show Total Inventory Value",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn parse(line: &str) -> Option<Self> {
        let mut chars = line.trim().chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::ALL.into_iter().find(|choice| choice.key() == key)
    }
}

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{}", "-".repeat(TITLE.len()))
}

pub fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\nMain Menu")?;
    for choice in MenuChoice::ALL {
        writeln!(out, "{}. {}", choice.key(), choice.label())?;
    }
    write!(out, "Enter your choice (1-{}): ", MenuChoice::Exit.key())?;
    out.flush()
}

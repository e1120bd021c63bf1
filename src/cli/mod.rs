//! CLI module for the gallery API
//!
//! - `serve`: HTTP server (default)
//! - `products`: print the normalized catalog as JSON
//! - `product`: print a single product card as JSON

pub mod catalog;
pub mod serve;

use clap::{Parser, Subcommand};

/// Gallery API - product catalog proxy and admin login
#[derive(Parser)]
#[command(name = "gallery-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Fetch the catalog and print it as JSON
    Products(catalog::ProductsArgs),

    /// Fetch one product by slug and print it as JSON
    Product(catalog::ProductArgs),
}

//! Console table and HTML digest output for listing sequences.

use crate::models::{Currency, Listing};
use maud::{html, Markup, DOCTYPE};
use std::borrow::Borrow;
use std::io::{self, Write};

const HEADER: [&str; 7] = ["updated", "type", "area", "rooms", "price", "constr.", "title"];

pub fn currency_symbol(currency: &Currency) -> &str {
    match currency {
        Currency::Euro => "€",
        Currency::Dollar => "$",
        Currency::Pound => "£",
        Currency::Other(code) => code,
    }
}

fn price(listing: &Listing) -> String {
    format!("{}{}", currency_symbol(&listing.currency), listing.price)
}

fn row(listing: &Listing) -> [String; 7] {
    [
        format!("{:.1}", listing.days_since_update),
        listing.property_type.to_string(),
        format!("{}m²", listing.area),
        format!("{:.1}", listing.rooms),
        price(listing),
        listing.construction_year.to_string(),
        listing.title.clone(),
    ]
}

/// Writes the listings as an aligned table, one listing per line.
pub fn write_table<W, L>(w: &mut W, listings: &[L]) -> io::Result<()>
where
    W: Write,
    L: Borrow<Listing>,
{
    let rows: Vec<[String; 7]> = listings.iter().map(|l| row(l.borrow())).collect();

    let mut widths = HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = HEADER.map(str::to_string);
    for cells in std::iter::once(&header).chain(&rows) {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i + 1 == cells.len() {
                line.push_str(cell);
            } else {
                let pad = widths[i] - cell.chars().count();
                line.push_str(cell);
                line.extend(std::iter::repeat(' ').take(pad + 2));
            }
        }
        writeln!(w, "{}", line)?;
    }
    Ok(())
}

/// One titled table of the HTML digest
pub fn html_section<L: Borrow<Listing>>(title: &str, listings: &[L]) -> Markup {
    html! {
        h2 { (title) }
        table {
            thead {
                tr {
                    th { "Updated" }
                    th { "Type" }
                    th { "Area" }
                    th { "Rooms" }
                    th { "Price" }
                    th { "Constr." }
                    th { "Title" }
                    th { "Summary" }
                    th { "Keywords" }
                }
            }
            tbody {
                @for listing in listings.iter().map(|l| l.borrow()) {
                    tr {
                        td { (format!("{:.1}", listing.days_since_update)) }
                        td { (listing.property_type.as_str()) }
                        td { (format!("{}m²", listing.area)) }
                        td { (listing.rooms.to_string()) }
                        td { (price(listing)) }
                        td { (listing.construction_year.to_string()) }
                        td { a href=(listing.url) { (listing.title) } }
                        td { (listing.description) }
                        td { (listing.keywords.join(", ")) }
                    }
                }
            }
        }
    }
}

/// Wraps digest sections into a complete HTML document.
pub fn html_digest(sections: &[Markup]) -> String {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Houser update" }
            }
            body {
                @for section in sections {
                    (section)
                }
            }
        }
    }
    .into_string()
}

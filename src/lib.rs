//! Search real-estate listing providers, then filter, sort and render the
//! results.
//!
//! ```no_run
//! use houser::models::pipeline::{by_price, by_rooms, min_rooms};
//! use houser::models::{filter, ordered_by, TransactionType};
//! use houser::providers::{NestoriaRepo, Query, Repository};
//!
//! # async fn run() -> houser::Result<()> {
//! let repo = NestoriaRepo::new("deutschland")?;
//! let query = Query::new()
//!     .city("Maxvorstadt")
//!     .transaction_type(TransactionType::Rent)
//!     .price(None, Some(1600));
//!
//! let mut listings = repo.search(&query).await?;
//! ordered_by(&[&by_price, &by_rooms]).sort(&mut listings);
//! let roomy = filter(&listings, &[&min_rooms(2.5)]);
//! # let _ = roomy;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod providers;
pub mod render;

pub use error::{RepoError, Result};

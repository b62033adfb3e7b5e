//! Role-gated tile catalogue for the DPS menu hub.
//!
//! # Purpose
//! Holds the authoritative list of admin tiles and resolves the ordered,
//! de-duplicated subset a caller may see from their role names.
//!
//! # How it fits
//! The menu service builds one [`TileCatalogue`] at startup (with the allow
//! list feature switch captured in an [`AllowListFeature`]) and shares it
//! read-only across every request.
//!
//! # Key invariants
//! - Titles are unique across the catalogue; they are the de-duplication key.
//! - `order` values are unique; resolved tiles are always ascending by order.
//! - The catalogue is never mutated after construction.
//!
//! # Examples
//! ```rust
//! use menu_tiles::{AllowListFeature, TileCatalogue};
//!
//! let catalogue = TileCatalogue::new(&AllowListFeature::disabled());
//! let tiles = catalogue.tiles_for_roles(["CREATE_USER"]);
//! assert_eq!(tiles.len(), 1);
//! assert_eq!(tiles[0].href, "/create-user");
//! ```
//!
//! # Common pitfalls
//! - Role names are expected without the `ROLE_` prefix carried in tokens;
//!   strip it at the boundary (see [`roles::strip_role_prefix`]).

mod catalogue;
mod resolver;
pub mod roles;
mod tile;

pub use catalogue::{AllowListFeature, TileCatalogue};
pub use tile::{Eligibility, MenuTile, TileDefinition};

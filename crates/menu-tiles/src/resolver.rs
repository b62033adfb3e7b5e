//! Role-to-tile resolution.
//!
//! # Purpose
//! Maps a caller's role names to the tiles they may see.
//!
//! # Key invariants
//! - First claim per title wins; a tile granted by several roles appears once.
//! - Output is ascending by catalogue `order` whatever the role order.
//! - Empty or unknown roles resolve to an empty list; resolution never fails.
use crate::catalogue::TileCatalogue;
use crate::tile::{MenuTile, TileDefinition};
use std::collections::HashSet;

impl TileCatalogue {
    /// Resolve the visible tiles for a set of role names.
    ///
    /// # What it does
    /// Walks the roles in the order given; for each role, every catalogue
    /// entry it admits is claimed unless its title was already claimed. The
    /// claimed entries are sorted by `order` and projected to [`MenuTile`].
    ///
    /// # Examples
    /// ```rust
    /// use menu_tiles::{AllowListFeature, TileCatalogue};
    ///
    /// let catalogue = TileCatalogue::new(&AllowListFeature::disabled());
    /// let tiles = catalogue.tiles_for_roles(["AUTH_GROUP_MANAGER", "MAINTAIN_OAUTH_USERS"]);
    /// assert_eq!(tiles.len(), 4);
    /// assert!(catalogue.tiles_for_roles(Vec::<String>::new()).is_empty());
    /// ```
    pub fn tiles_for_roles<I, S>(&self, roles: I) -> Vec<MenuTile>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut claimed_titles: HashSet<&str> = HashSet::new();
        let mut claimed: Vec<&TileDefinition> = Vec::new();
        for role in roles {
            let role = role.as_ref();
            for entry in self.entries() {
                if entry.eligibility.admits(role) && claimed_titles.insert(entry.title.as_str()) {
                    claimed.push(entry);
                }
            }
        }
        claimed.sort_by_key(|entry| entry.order);
        claimed.into_iter().map(TileDefinition::to_menu_tile).collect()
    }
}

use serde::Serialize;

pub const GRID_COLUMNS: u16 = 11;
pub const GRID_ROWS: u16 = 8;

/// One state in the tile-grid map, keyed by its FIPS code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateTile {
    pub fips: u32,
    pub abbreviation: &'static str,
    pub row: u16,
    pub column: u16,
}

const fn tile(fips: u32, abbreviation: &'static str, row: u16, column: u16) -> StateTile {
    StateTile {
        fips,
        abbreviation,
        row,
        column,
    }
}

/// Equal-area tile layout of the 50 states plus DC.
pub const US_TILES: [StateTile; 51] = [
    tile(2, "AK", 0, 0),
    tile(23, "ME", 0, 10),
    tile(50, "VT", 1, 9),
    tile(33, "NH", 1, 10),
    tile(53, "WA", 2, 0),
    tile(16, "ID", 2, 1),
    tile(30, "MT", 2, 2),
    tile(38, "ND", 2, 3),
    tile(27, "MN", 2, 4),
    tile(17, "IL", 2, 5),
    tile(55, "WI", 2, 6),
    tile(26, "MI", 2, 7),
    tile(36, "NY", 2, 8),
    tile(44, "RI", 2, 9),
    tile(25, "MA", 2, 10),
    tile(41, "OR", 3, 0),
    tile(32, "NV", 3, 1),
    tile(56, "WY", 3, 2),
    tile(46, "SD", 3, 3),
    tile(19, "IA", 3, 4),
    tile(18, "IN", 3, 5),
    tile(39, "OH", 3, 6),
    tile(42, "PA", 3, 7),
    tile(34, "NJ", 3, 8),
    tile(9, "CT", 3, 9),
    tile(6, "CA", 4, 0),
    tile(49, "UT", 4, 1),
    tile(8, "CO", 4, 2),
    tile(31, "NE", 4, 3),
    tile(29, "MO", 4, 4),
    tile(21, "KY", 4, 5),
    tile(54, "WV", 4, 6),
    tile(51, "VA", 4, 7),
    tile(24, "MD", 4, 8),
    tile(10, "DE", 4, 9),
    tile(4, "AZ", 5, 1),
    tile(35, "NM", 5, 2),
    tile(20, "KS", 5, 3),
    tile(5, "AR", 5, 4),
    tile(47, "TN", 5, 5),
    tile(37, "NC", 5, 6),
    tile(45, "SC", 5, 7),
    tile(11, "DC", 5, 8),
    tile(40, "OK", 6, 3),
    tile(22, "LA", 6, 4),
    tile(28, "MS", 6, 5),
    tile(1, "AL", 6, 6),
    tile(13, "GA", 6, 7),
    tile(15, "HI", 7, 0),
    tile(48, "TX", 7, 3),
    tile(12, "FL", 7, 8),
];

pub fn tile_for(fips: u32) -> Option<StateTile> {
    US_TILES.iter().copied().find(|tile| tile.fips == fips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tiles_are_unique_and_inside_the_grid() {
        let ids: HashSet<_> = US_TILES.iter().map(|tile| tile.fips).collect();
        let cells: HashSet<_> = US_TILES.iter().map(|tile| (tile.row, tile.column)).collect();

        assert_eq!(ids.len(), US_TILES.len());
        assert_eq!(cells.len(), US_TILES.len());
        assert!(US_TILES
            .iter()
            .all(|tile| tile.row < GRID_ROWS && tile.column < GRID_COLUMNS));
    }

    #[test]
    fn lookup_by_fips() {
        assert_eq!(tile_for(39).map(|tile| tile.abbreviation), Some("OH"));
        assert_eq!(tile_for(72), None);
    }
}

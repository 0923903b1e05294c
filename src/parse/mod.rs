/// Configuration files, one `orbitals,particles` block per row.
pub mod configuration;

/// Coordinate table of an enumeration map.
pub mod table;

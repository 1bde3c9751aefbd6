pub const DEOVERLAPPED_EXT: &str = "deoverlapped";
pub const OVERLAPS_EXT: &str = "overlaps";
pub const STDIO: &str = "-";

//! Field Mapper: value coercions shared by request validation, and the
//! snake_case storage rows exchanged with the secondary data API.

pub mod coerce;
pub mod columns;

pub use coerce::*;
pub use columns::*;

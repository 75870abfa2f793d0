mod filter;
mod municipality_code;
mod office;
mod round;
mod zone_code;

pub use filter::FilterContext;
pub use municipality_code::MunicipalityCode;
pub use office::Office;
pub use round::Round;
pub use zone_code::ZoneCode;

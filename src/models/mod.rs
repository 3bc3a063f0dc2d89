pub mod emission_record;
pub mod user;

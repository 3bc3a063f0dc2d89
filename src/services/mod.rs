pub mod calculator;
pub mod eco_facts;
pub mod factors;
pub mod record_store;
pub mod suggestions;

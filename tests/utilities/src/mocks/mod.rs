pub mod fee_data;
pub mod time;

pub mod detail;
pub mod envelope;
pub mod insights;
pub mod request_params;
pub mod stock;

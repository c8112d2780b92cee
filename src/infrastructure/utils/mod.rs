pub mod get_client_ip;
pub mod phone;
pub mod sanitize;

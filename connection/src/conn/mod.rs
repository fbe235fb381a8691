pub mod connection;
pub mod connection_options;
pub mod packet_channel;

pub mod authenticate_command;
pub mod command;
pub mod dump_binlog_command;
pub mod query_command;

pub mod engine_command;
